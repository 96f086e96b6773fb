//! Suggestion service plumbing
//!
//! Wire types, the HTTP client, the debounce scheduler and the displayed
//! panel state.

mod client;
mod panel;
mod protocol;
pub mod scheduler;

pub use client::{ClientConfig, DEFAULT_SERVER, PredClient, SuggestError, Suggester};
pub use panel::{EXPLOIT_TITLE, EXPLORE_TITLE, PanelView, SuggestionPanel, format_score};
pub use protocol::{
    FALLBACK_ERROR, PredictRequest, ScoredWord, SuggestionLists, SuggestionOutcome,
};
pub use scheduler::{SuggestionScheduler, TickAction};
