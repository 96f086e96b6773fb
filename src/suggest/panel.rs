//! What the suggestion area currently shows

use super::protocol::{SuggestionLists, SuggestionOutcome};

/// Heading for the likely-solution list
pub const EXPLOIT_TITLE: &str = "To solve";
/// Heading for the narrowing list
pub const EXPLORE_TITLE: &str = "To reduce";

/// Displayed suggestion state: loading flag, last error, last lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionPanel {
    loading: bool,
    error: Option<String>,
    lists: SuggestionLists,
}

/// Which view the suggestion area renders; loading beats error beats lists
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelView<'a> {
    Loading,
    Error(&'a str),
    Lists(&'a SuggestionLists),
}

impl SuggestionPanel {
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Apply a finished request
    ///
    /// Success replaces both lists and clears the error; failure records the
    /// message and empties the lists.
    pub fn apply(&mut self, outcome: SuggestionOutcome) {
        self.loading = false;
        match outcome {
            SuggestionOutcome::Ok(lists) => {
                self.error = None;
                self.lists = lists;
            }
            SuggestionOutcome::Err(message) => {
                self.error = Some(message);
                self.lists = SuggestionLists::default();
            }
        }
    }

    #[must_use]
    pub fn view(&self) -> PanelView<'_> {
        if self.loading {
            PanelView::Loading
        } else if let Some(err) = &self.error {
            PanelView::Error(err)
        } else {
            PanelView::Lists(&self.lists)
        }
    }

    #[must_use]
    pub const fn lists(&self) -> &SuggestionLists {
        &self.lists
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Score truncated (not rounded) to two decimals, without trailing zeros
#[must_use]
pub fn format_score(score: f64) -> String {
    let truncated = (score * 100.0).trunc() / 100.0;
    format!("{truncated}")
}
