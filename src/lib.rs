//! Wordle Assistant
//!
//! A terminal client for a Wordle suggestion service: record the words you
//! played and their colours, and get back words that solve the puzzle or
//! narrow it down.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_assist::core::{CharStatus, PuzzleState};
//! use wordle_assist::suggest::PredictRequest;
//!
//! let mut puzzle = PuzzleState::new(5);
//! puzzle.accept_suggestion("weary").unwrap();
//! puzzle.toggle(0, 0).unwrap();
//! assert_eq!(puzzle.statuses()[0][0], CharStatus::Present);
//!
//! let request = PredictRequest::from_puzzle(&puzzle, "en", 5);
//! assert_eq!(request.resp, vec!["10000".to_string()]);
//! ```

// Core domain types
pub mod core;

// Suggestion service client and scheduling
pub mod suggest;

// Persisted UI preferences
pub mod prefs;

// Static option lists
pub mod catalog;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
