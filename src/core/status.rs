//! Per-letter feedback marks
//!
//! The service encodes feedback as one digit per letter:
//! - 0 = absent (letter not in word)
//! - 1 = present (letter in word, wrong position)
//! - 2 = correct (letter in correct position)

use std::fmt;

/// Feedback mark for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum CharStatus {
    #[default]
    Absent,
    Present,
    Correct,
}

impl CharStatus {
    /// Next mark in the toggle cycle `absent → present → correct → absent`
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Absent => Self::Present,
            Self::Present => Self::Correct,
            Self::Correct => Self::Absent,
        }
    }

    /// Wire digit for this mark
    #[must_use]
    pub const fn digit(self) -> char {
        match self {
            Self::Absent => '0',
            Self::Present => '1',
            Self::Correct => '2',
        }
    }

    /// Parse a wire digit, also accepting the usual G/Y/- letters
    #[must_use]
    pub const fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' | '-' | '_' | '⬜' => Some(Self::Absent),
            '1' | 'Y' | 'y' | '🟨' => Some(Self::Present),
            '2' | 'G' | 'g' | '🟩' => Some(Self::Correct),
            _ => None,
        }
    }
}

impl fmt::Display for CharStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Absent => "absent",
            Self::Present => "present",
            Self::Correct => "correct",
        };
        f.write_str(name)
    }
}

/// Encode a status row as the fixed-length digit string sent to the service
#[must_use]
pub fn encode_row(row: &[CharStatus]) -> String {
    row.iter().map(|s| s.digit()).collect()
}

/// Parse a digit string like "20010" or "G---Y" into a status row
#[must_use]
pub fn decode_row(s: &str) -> Option<Vec<CharStatus>> {
    s.chars().map(CharStatus::from_digit).collect()
}
