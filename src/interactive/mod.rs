//! Interactive TUI interface

mod app;
mod rendering;

pub use app::{App, Focus, Message, MessageStyle, SuggestionColumn, run_tui};
