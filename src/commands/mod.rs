//! Command implementations

pub mod simple;
pub mod suggest;

pub use simple::{LineCommand, parse_line, run_simple};
pub use suggest::{build_puzzle, run_suggest};
