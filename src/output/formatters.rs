//! Formatting utilities for terminal output

use crate::core::CharStatus;

/// Format a status row as an emoji string
#[must_use]
pub fn statuses_to_emoji(row: &[CharStatus]) -> String {
    row.iter()
        .map(|status| match status {
            CharStatus::Absent => '⬜',
            CharStatus::Present => '🟨',
            CharStatus::Correct => '🟩',
        })
        .collect()
}

/// Create a bar whose length is proportional to a score in `[0, max]`
#[must_use]
pub fn score_bar(score: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 { (score / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * width as f64) as usize).min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
