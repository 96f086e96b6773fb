//! Puzzle grid state
//!
//! Holds the submitted guesses, the feedback row for each guess and the
//! guess currently being typed. `guesses` and `statuses` are always the same
//! length and index-aligned.

use super::grapheme;
use super::status::CharStatus;
use thiserror::Error;

/// Word length used when nothing else is configured
pub const DEFAULT_WORD_LEN: usize = 5;

/// Number of rows the grid can hold
pub const MAX_ROWS: usize = 6;

/// Rejected grid mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("Not enough letters: expected {expected}, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("The grid is full")]
    GridFull,
    #[error("No row {0}")]
    NoSuchRow(usize),
    #[error("No cell {col} in row {row}")]
    NoSuchCell { row: usize, col: usize },
}

/// Guesses, their feedback rows and the in-progress guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    guesses: Vec<String>,
    statuses: Vec<Vec<CharStatus>>,
    current: String,
    word_len: usize,
    max_rows: usize,
}

impl Default for PuzzleState {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_LEN)
    }
}

impl PuzzleState {
    #[must_use]
    pub const fn new(word_len: usize) -> Self {
        Self::with_rows(word_len, MAX_ROWS)
    }

    #[must_use]
    pub const fn with_rows(word_len: usize, max_rows: usize) -> Self {
        Self {
            guesses: Vec::new(),
            statuses: Vec::new(),
            current: String::new(),
            word_len,
            max_rows,
        }
    }

    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    #[must_use]
    pub fn statuses(&self) -> &[Vec<CharStatus>] {
        &self.statuses
    }

    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    #[must_use]
    pub const fn word_len(&self) -> usize {
        self.word_len
    }

    #[must_use]
    pub const fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Whether another guess can still be typed
    #[must_use]
    pub fn has_room(&self) -> bool {
        self.guesses.len() < self.max_rows
    }

    /// Iterate completed rows as `(guess, statuses)` pairs
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[CharStatus])> {
        self.guesses
            .iter()
            .zip(&self.statuses)
            .map(|(g, s)| (g.as_str(), s.as_slice()))
    }

    /// Append a letter to the in-progress guess
    ///
    /// Returns `false` without changing anything when the guess is already
    /// full or the grid has no room left.
    pub fn push_char(&mut self, c: char) -> bool {
        if !self.has_room() {
            return false;
        }
        let mut next = self.current.clone();
        next.extend(c.to_uppercase());
        if grapheme::len(&next) > self.word_len {
            return false;
        }
        self.current = next;
        true
    }

    /// Remove the last visible character of the in-progress guess
    pub fn pop_char(&mut self) {
        let len = grapheme::without_last(&self.current).len();
        self.current.truncate(len);
    }

    /// Submit the in-progress guess as a new row of all-absent marks
    ///
    /// # Errors
    /// `PuzzleError::WrongLength` if the guess does not have exactly
    /// `word_len` visible characters; the state is left untouched.
    pub fn submit(&mut self) -> Result<(), PuzzleError> {
        let guess = self.current.clone();
        self.append_guess(guess)?;
        self.current.clear();
        Ok(())
    }

    /// Add a word picked from the suggestion lists as a new row
    ///
    /// # Errors
    /// Same validation as [`PuzzleState::submit`], plus `GridFull`.
    pub fn accept_suggestion(&mut self, word: &str) -> Result<(), PuzzleError> {
        if !self.has_room() {
            return Err(PuzzleError::GridFull);
        }
        self.append_guess(word.to_uppercase())?;
        self.current.clear();
        Ok(())
    }

    /// Add a played word together with its marks
    ///
    /// # Errors
    /// `GridFull`, or `WrongLength` if the word or its marks do not have
    /// `word_len` entries. Nothing changes on error.
    pub fn add_row(&mut self, word: &str, marks: Vec<CharStatus>) -> Result<(), PuzzleError> {
        if marks.len() != self.word_len {
            return Err(PuzzleError::WrongLength {
                expected: self.word_len,
                actual: marks.len(),
            });
        }
        self.accept_suggestion(word)?;
        if let Some(last) = self.statuses.last_mut() {
            *last = marks;
        }
        Ok(())
    }

    fn append_guess(&mut self, guess: String) -> Result<(), PuzzleError> {
        let actual = grapheme::len(&guess);
        if actual != self.word_len {
            return Err(PuzzleError::WrongLength {
                expected: self.word_len,
                actual,
            });
        }
        self.statuses.push(vec![CharStatus::Absent; actual]);
        self.guesses.push(guess);
        Ok(())
    }

    /// Cycle the mark of one letter of a completed row
    ///
    /// # Errors
    /// `NoSuchRow` / `NoSuchCell` when the index is out of range.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CharStatus, PuzzleError> {
        let marks = self
            .statuses
            .get_mut(row)
            .ok_or(PuzzleError::NoSuchRow(row))?;
        let cell = marks
            .get_mut(col)
            .ok_or(PuzzleError::NoSuchCell { row, col })?;
        *cell = cell.cycle();
        Ok(*cell)
    }

    /// Remove a completed row, shifting later rows up
    ///
    /// # Errors
    /// `NoSuchRow` when `row` is out of range.
    pub fn delete_row(&mut self, row: usize) -> Result<String, PuzzleError> {
        if row >= self.guesses.len() {
            return Err(PuzzleError::NoSuchRow(row));
        }
        self.statuses.remove(row);
        Ok(self.guesses.remove(row))
    }

    /// Discard everything and start over with the given word length
    pub fn reset(&mut self, word_len: usize) {
        self.guesses.clear();
        self.statuses.clear();
        self.current.clear();
        self.word_len = word_len;
    }
}
