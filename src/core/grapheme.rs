//! Grapheme-aware text helpers
//!
//! Guesses are measured by what the user sees, not by bytes or code points,
//! so a letter like "é" written as `e` + combining accent counts once.

use unicode_segmentation::UnicodeSegmentation;

/// Split text into extended grapheme clusters
#[must_use]
pub fn split(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Number of visible characters in `text`
#[must_use]
pub fn len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Return `text` without its last grapheme
#[must_use]
pub fn without_last(text: &str) -> &str {
    text.grapheme_indices(true)
        .next_back()
        .map_or(text, |(idx, _)| &text[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_counts_bytes() {
        assert_eq!(len("WEARY"), 5);
        assert_eq!(split("ABC"), vec!["A", "B", "C"]);
    }

    #[test]
    fn combining_marks_count_once() {
        let word = "cafe\u{301}";
        assert_eq!(word.chars().count(), 5);
        assert_eq!(len(word), 4);
        assert_eq!(split(word).last(), Some(&"e\u{301}"));
    }

    #[test]
    fn multibyte_letters_count_once() {
        assert_eq!(len("ÄÖÜSS"), 5);
        assert_eq!(len("한국어"), 3);
    }

    #[test]
    fn without_last_drops_whole_cluster() {
        assert_eq!(without_last("cafe\u{301}"), "caf");
        assert_eq!(without_last("AB"), "A");
        assert_eq!(without_last(""), "");
    }
}
