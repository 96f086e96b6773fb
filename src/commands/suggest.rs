//! One-shot suggestion command

use super::simple::fetch_with_spinner;
use crate::catalog;
use crate::core::{CharStatus, PuzzleState, decode_row, grapheme};
use crate::output::{print_board, print_suggestions};
use crate::suggest::{PredictRequest, Suggester, SuggestionOutcome};
use anyhow::{Context, Result, anyhow, bail};
use tokio::runtime::Handle;
use tracing::info;

/// Parse one `WORD=DIGITS` argument
///
/// # Errors
/// Returns an error if the separator is missing or the marks are invalid.
pub fn parse_row(arg: &str) -> Result<(String, Vec<CharStatus>)> {
    let (word, digits) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected WORD=DIGITS, got '{arg}'"))?;
    let marks = decode_row(digits).ok_or_else(|| anyhow!("Invalid colours '{digits}' for {word}"))?;
    Ok((word.to_string(), marks))
}

/// Build a puzzle from `WORD=DIGITS` arguments
///
/// Without an explicit length, the first word decides it.
///
/// # Errors
/// Returns an error for malformed rows, mismatched lengths or too many rows.
pub fn build_puzzle(rows: &[String], word_len: Option<usize>, default_len: usize) -> Result<PuzzleState> {
    let parsed = rows
        .iter()
        .map(|arg| parse_row(arg))
        .collect::<Result<Vec<_>>>()?;

    let word_len = word_len
        .or_else(|| parsed.first().map(|(word, _)| grapheme::len(word)))
        .unwrap_or(default_len);
    let word_len = catalog::check_word_length(word_len).map_err(|msg| anyhow!(msg))?;

    let mut state = PuzzleState::new(word_len);
    for (word, marks) in parsed {
        state
            .add_row(&word, marks)
            .with_context(|| format!("Cannot add {word}"))?;
    }
    Ok(state)
}

/// Fetch and print suggestions for the given rows
///
/// # Errors
/// Returns an error for invalid input or when the service reports a failure.
pub fn run_suggest<S: Suggester>(
    suggester: &S,
    runtime: &Handle,
    state: &PuzzleState,
    lang: &str,
    k: usize,
) -> Result<()> {
    print_board(state);
    let request = PredictRequest::from_puzzle(state, lang, k);
    info!(rows = state.guesses().len(), lang, k, "one-shot suggestion request");

    match fetch_with_spinner(suggester, runtime, request) {
        SuggestionOutcome::Ok(lists) => {
            print_suggestions(&lists);
            Ok(())
        }
        SuggestionOutcome::Err(msg) => bail!("Suggestion request failed: {msg}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(rows: &[&str]) -> Vec<String> {
        rows.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parse_row_accepts_digits_and_letters() {
        let (word, marks) = parse_row("weary=G-Y00").unwrap();
        assert_eq!(word, "weary");
        assert_eq!(marks, decode_row("20100").unwrap());
    }

    #[test]
    fn parse_row_rejects_missing_separator() {
        assert!(parse_row("weary").is_err());
        assert!(parse_row("weary=2x").is_err());
    }

    #[test]
    fn length_comes_from_first_row() {
        let state = build_puzzle(&args(&["house=00000", "pilot=01020"]), None, 6).unwrap();
        assert_eq!(state.word_len(), 5);
        assert_eq!(state.guesses(), ["HOUSE", "PILOT"]);
        assert_eq!(state.statuses()[1][3], CharStatus::Correct);
    }

    #[test]
    fn no_rows_uses_default_length() {
        let state = build_puzzle(&[], None, 6).unwrap();
        assert_eq!(state.word_len(), 6);
        assert!(state.guesses().is_empty());
    }

    #[test]
    fn explicit_length_is_enforced() {
        assert!(build_puzzle(&args(&["house=00000"]), Some(4), 5).is_err());
    }

    #[test]
    fn colour_count_must_match_word() {
        assert!(build_puzzle(&args(&["house=000"]), None, 5).is_err());
    }

    #[test]
    fn unsupported_inferred_length_is_rejected() {
        let err = build_puzzle(&args(&["abc=000"]), None, 5).unwrap_err();
        assert!(err.to_string().contains("between 4 and 10"), "{err}");
        assert!(build_puzzle(&args(&["abcdefghijk=00000000000"]), None, 5).is_err());
    }

    #[test]
    fn too_many_rows_is_rejected() {
        let rows = args(&["house=00000"; 7]);
        assert!(build_puzzle(&rows, None, 5).is_err());
    }
}
