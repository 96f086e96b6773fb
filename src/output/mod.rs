//! Terminal output formatting
//!
//! Display utilities for the line-mode commands.

pub mod display;
pub mod formatters;

pub use display::{print_board, print_suggestion_error, print_suggestions};
