//! Simple interactive CLI mode
//!
//! Text-based assistant without the TUI: type each played word with its
//! colours, get suggestions back after every change.

use crate::core::{CharStatus, PuzzleState, decode_row};
use crate::output::{print_board, print_suggestion_error, print_suggestions};
use crate::suggest::{PredictRequest, Suggester, SuggestionOutcome};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::io::{self, Write};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Quit,
    New,
    Undo,
    /// Add a row; marks default to all absent when omitted
    Add {
        word: String,
        marks: Option<Vec<CharStatus>>,
    },
    /// Remove row (0-based)
    Delete(usize),
    /// Cycle one letter (0-based row and column)
    Toggle(usize, usize),
    Invalid(String),
}

fn parse_index(s: &str) -> Option<usize> {
    s.parse::<usize>().ok()?.checked_sub(1)
}

/// Parse a line of user input
#[must_use]
pub fn parse_line(line: &str) -> LineCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [cmd] if matches!(cmd.to_lowercase().as_str(), "quit" | "q" | "exit") => LineCommand::Quit,
        [cmd] if matches!(cmd.to_lowercase().as_str(), "new" | "n") => LineCommand::New,
        [cmd] if matches!(cmd.to_lowercase().as_str(), "undo" | "u") => LineCommand::Undo,
        [cmd, row] if matches!(cmd.to_lowercase().as_str(), "delete" | "del") => {
            parse_index(row).map_or_else(
                || LineCommand::Invalid(format!("Not a row number: {row}")),
                LineCommand::Delete,
            )
        }
        [cmd, row, col] if cmd.eq_ignore_ascii_case("toggle") => {
            match (parse_index(row), parse_index(col)) {
                (Some(r), Some(c)) => LineCommand::Toggle(r, c),
                _ => LineCommand::Invalid("Usage: toggle <row> <letter>".to_string()),
            }
        }
        [word] => LineCommand::Add {
            word: (*word).to_string(),
            marks: None,
        },
        [word, digits] => decode_row(digits).map_or_else(
            || LineCommand::Invalid(format!("Invalid colours '{digits}': use 0/1/2 or -/Y/G")),
            |marks| LineCommand::Add {
                word: (*word).to_string(),
                marks: Some(marks),
            },
        ),
        [] => LineCommand::Invalid("Enter a word, optionally followed by its colours".to_string()),
        _ => LineCommand::Invalid(format!("Could not understand '{line}'")),
    }
}

/// Apply a command; returns `Ok(true)` if the board changed
///
/// # Errors
/// Returns the user-facing reason when the command is rejected.
pub fn apply(state: &mut PuzzleState, command: LineCommand) -> Result<bool, String> {
    match command {
        LineCommand::Quit => Ok(false),
        LineCommand::New => {
            state.reset(state.word_len());
            Ok(true)
        }
        LineCommand::Undo => {
            let last = state
                .guesses()
                .len()
                .checked_sub(1)
                .ok_or("Nothing to undo!")?;
            state.delete_row(last).map_err(|e| e.to_string())?;
            Ok(true)
        }
        LineCommand::Add { word, marks } => {
            let added = match marks {
                Some(marks) => state.add_row(&word, marks),
                None => state.accept_suggestion(&word),
            };
            added.map(|()| true).map_err(|e| e.to_string())
        }
        LineCommand::Delete(row) => state.delete_row(row).map(|_| true).map_err(|e| e.to_string()),
        LineCommand::Toggle(row, col) => state
            .toggle(row, col)
            .map(|_| true)
            .map_err(|e| e.to_string()),
        LineCommand::Invalid(msg) => Err(msg),
    }
}

/// Fetch suggestions with a spinner on screen
pub fn fetch_with_spinner<S: Suggester>(
    suggester: &S,
    runtime: &Handle,
    request: PredictRequest,
) -> SuggestionOutcome {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Fetching suggestions...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let outcome = runtime.block_on(suggester.suggest(request));
    spinner.finish_and_clear();
    outcome
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple<S: Suggester>(
    suggester: &S,
    runtime: &Handle,
    mut state: PuzzleState,
    lang: &str,
    k: usize,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Wordle Assistant - Line Mode                 ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Enter each word you played followed by its colours:");
    println!("  - 0 or - for absent, 1 or Y for present, 2 or G for correct");
    println!("  - e.g. 'WEARY 20000'");
    println!("Commands: 'undo', 'delete <row>', 'toggle <row> <letter>', 'new', 'quit'\n");

    let mut changed = true;
    loop {
        if changed {
            print_board(&state);
            let request = PredictRequest::from_puzzle(&state, lang, k);
            match fetch_with_spinner(suggester, runtime, request) {
                SuggestionOutcome::Ok(lists) => print_suggestions(&lists),
                SuggestionOutcome::Err(msg) => print_suggestion_error(&msg),
            }
        }

        let line = get_user_input(&format!("Guess {}", state.guesses().len() + 1))?;
        let command = parse_line(&line);
        debug!(?command, "line command");
        if command == LineCommand::Quit {
            println!("\n👋 Good luck!\n");
            return Ok(());
        }

        changed = match apply(&mut state, command) {
            Ok(changed) => changed,
            Err(msg) => {
                println!("❌ {msg}\n");
                false
            }
        };
    }
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    if read == 0 {
        // EOF behaves like quit
        return Ok("quit".to_string());
    }

    Ok(input.trim().to_string())
}
