//! Wire format of the `/pred` endpoint
//!
//! Request: `{wordlen, lang, trial, resp, k}` where each `resp` entry is the
//! digit encoding of the matching `trial` row.
//! Response: `{success, msg?, result?: {to_exploit, to_explore}}`, decoded once
//! into a [`SuggestionOutcome`].

use crate::core::{PuzzleState, encode_row};
use serde::{Deserialize, Serialize};

/// Message shown when the service fails without saying why
pub const FALLBACK_ERROR: &str = "Failed to fetch";

/// Body of a `/pred` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub wordlen: usize,
    pub lang: String,
    pub trial: Vec<String>,
    pub resp: Vec<String>,
    pub k: usize,
}

impl PredictRequest {
    /// Snapshot the completed rows of a puzzle into a request
    #[must_use]
    pub fn from_puzzle(state: &PuzzleState, lang: &str, k: usize) -> Self {
        Self {
            wordlen: state.word_len(),
            lang: lang.to_string(),
            trial: state.guesses().to_vec(),
            resp: state.statuses().iter().map(|row| encode_row(row)).collect(),
            k,
        }
    }
}

/// A scored word as sent by the service
pub type ScoredWord = (f64, String);

/// The two ranked lists returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionLists {
    /// Likely solutions
    pub to_exploit: Vec<ScoredWord>,
    /// Informative guesses that narrow the candidates
    pub to_explore: Vec<ScoredWord>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    success: bool,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    result: Option<SuggestionLists>,
}

/// Result of one suggestion round trip
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionOutcome {
    Ok(SuggestionLists),
    Err(String),
}

impl SuggestionOutcome {
    /// Decode a response body
    ///
    /// A body that is not valid JSON of the expected shape becomes an error
    /// carrying the parser message.
    #[must_use]
    pub fn decode(body: &str) -> Self {
        match serde_json::from_str::<RawResponse>(body) {
            Ok(raw) => Self::from_raw(raw),
            Err(err) => Self::Err(format!("Malformed response: {err}")),
        }
    }

    fn from_raw(raw: RawResponse) -> Self {
        match (raw.success, raw.result) {
            (true, Some(lists)) => Self::Ok(lists),
            _ => Self::Err(raw.msg.unwrap_or_else(|| FALLBACK_ERROR.to_string())),
        }
    }

    /// Error message carried by a failure body, if the body is readable
    #[must_use]
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<RawResponse>(body).ok()?.msg
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_encodes_rows_as_digits() {
        let mut state = PuzzleState::new(5);
        state.accept_suggestion("weary").unwrap();
        state.toggle(0, 0).unwrap();
        state.toggle(0, 0).unwrap();

        let req = PredictRequest::from_puzzle(&state, "en", 5);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "wordlen": 5,
                "lang": "en",
                "trial": ["WEARY"],
                "resp": ["20000"],
                "k": 5
            })
        );
    }

    #[test]
    fn empty_puzzle_sends_empty_lists() {
        let req = PredictRequest::from_puzzle(&PuzzleState::new(6), "en", 3);
        assert_eq!(req.wordlen, 6);
        assert!(req.trial.is_empty());
        assert!(req.resp.is_empty());
    }

    #[test]
    fn decode_success() {
        let body = r#"{"success":true,"result":{"to_exploit":[[0.92,"WORLD"]],"to_explore":[[0.5,"AUDIO"]]}}"#;
        let SuggestionOutcome::Ok(lists) = SuggestionOutcome::decode(body) else {
            panic!("expected success");
        };
        assert_eq!(lists.to_exploit, vec![(0.92, "WORLD".to_string())]);
        assert_eq!(lists.to_explore, vec![(0.5, "AUDIO".to_string())]);
    }

    #[test]
    fn decode_failure_keeps_message() {
        let body = r#"{"success":false,"msg":"rate limited"}"#;
        assert_eq!(
            SuggestionOutcome::decode(body),
            SuggestionOutcome::Err("rate limited".to_string())
        );
    }

    #[test]
    fn decode_failure_without_message_uses_fallback() {
        assert_eq!(
            SuggestionOutcome::decode(r#"{"success":false,"msg":null,"result":null}"#),
            SuggestionOutcome::Err(FALLBACK_ERROR.to_string())
        );
        assert_eq!(
            SuggestionOutcome::decode(r#"{"success":true}"#),
            SuggestionOutcome::Err(FALLBACK_ERROR.to_string())
        );
    }

    #[test]
    fn decode_malformed_body() {
        let outcome = SuggestionOutcome::decode("<html>502</html>");
        assert!(!outcome.is_ok());
        let SuggestionOutcome::Err(msg) = outcome else {
            unreachable!()
        };
        assert!(msg.starts_with("Malformed response"));
    }
}
