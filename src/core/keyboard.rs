//! On-screen keyboard colouring
//!
//! Each key shows the best mark its letter has received in any row.

use super::grapheme;
use super::puzzle::PuzzleState;
use super::status::CharStatus;
use rustc_hash::FxHashMap;

/// Key rows of the on-screen keyboard
pub const KEY_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Best known status per letter
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyStatuses(FxHashMap<String, CharStatus>);

impl KeyStatuses {
    /// Collect key statuses from every completed row
    #[must_use]
    pub fn from_puzzle(state: &PuzzleState) -> Self {
        let mut map: FxHashMap<String, CharStatus> = FxHashMap::default();
        for (guess, marks) in state.rows() {
            for (letter, &mark) in grapheme::split(guess).into_iter().zip(marks) {
                let best = map.entry(letter.to_uppercase()).or_insert(mark);
                if mark > *best {
                    *best = mark;
                }
            }
        }
        Self(map)
    }

    /// Status of a key, `None` if the letter was never guessed
    #[must_use]
    pub fn get(&self, letter: &str) -> Option<CharStatus> {
        self.0.get(&letter.to_uppercase()).copied()
    }
}
