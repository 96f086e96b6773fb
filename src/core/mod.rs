//! Core domain types for the puzzle grid
//!
//! Pure state with no IO: grapheme helpers, feedback marks, the grid and the
//! keyboard colouring derived from it.

pub mod grapheme;
mod keyboard;
mod puzzle;
mod status;

pub use keyboard::{KEY_ROWS, KeyStatuses};
pub use puzzle::{DEFAULT_WORD_LEN, MAX_ROWS, PuzzleError, PuzzleState};
pub use status::{CharStatus, decode_row, encode_row};
