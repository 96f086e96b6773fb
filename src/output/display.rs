//! Display functions for the line-mode commands

use super::formatters::{score_bar, statuses_to_emoji};
use crate::core::{CharStatus, PuzzleState, grapheme};
use crate::suggest::{EXPLOIT_TITLE, EXPLORE_TITLE, ScoredWord, SuggestionLists, format_score};
use colored::Colorize;

fn colored_letter(letter: &str, status: CharStatus) -> String {
    let cell = format!(" {letter} ");
    match status {
        CharStatus::Absent => cell.white().on_bright_black().bold().to_string(),
        CharStatus::Present => cell.black().on_yellow().bold().to_string(),
        CharStatus::Correct => cell.black().on_green().bold().to_string(),
    }
}

/// Print every completed row with its colours
pub fn print_board(state: &PuzzleState) {
    if state.guesses().is_empty() {
        println!("{}", "(no guesses yet)".bright_black());
        return;
    }

    for (i, (guess, marks)) in state.rows().enumerate() {
        let cells: String = grapheme::split(guess)
            .into_iter()
            .zip(marks)
            .map(|(letter, &mark)| colored_letter(letter, mark))
            .collect();
        println!("{}: {cells}  {}", i + 1, statuses_to_emoji(marks));
    }
}

fn print_list(title: &str, words: &[ScoredWord]) {
    println!("\n{}", title.bright_cyan().bold());
    if words.is_empty() {
        println!("   {}", "(nothing)".bright_black());
        return;
    }

    let max = words.iter().map(|(score, _)| *score).fold(0.0_f64, f64::max);
    for (score, word) in words {
        println!(
            "   → {:<10} {} {}",
            word.to_uppercase().green().bold(),
            score_bar(*score, max, 12).bright_black(),
            format_score(*score).bright_yellow()
        );
    }
}

/// Print both suggestion lists
pub fn print_suggestions(lists: &SuggestionLists) {
    print_list(EXPLOIT_TITLE, &lists.to_exploit);
    print_list(EXPLORE_TITLE, &lists.to_explore);
    println!();
}

/// Print a failed suggestion request
pub fn print_suggestion_error(message: &str) {
    println!("\n{} {}\n", "✗".red().bold(), message.red());
}
