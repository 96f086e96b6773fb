//! Static option lists for the settings controls

/// A selectable option: stored value and display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionItem<T> {
    pub value: T,
    pub name: &'static str,
}

/// Dictionaries the service knows
pub const DICTIONARIES: &[OptionItem<&str>] = &[OptionItem {
    value: "en",
    name: "English",
}];

/// Word lengths the service accepts
pub const WORD_LENGTHS: &[OptionItem<usize>] = &[
    OptionItem { value: 4, name: "4" },
    OptionItem { value: 5, name: "5" },
    OptionItem { value: 6, name: "6" },
    OptionItem { value: 7, name: "7" },
    OptionItem { value: 8, name: "8" },
    OptionItem { value: 9, name: "9" },
    OptionItem { value: 10, name: "10" },
];

/// Value following `current` in `options`, wrapping around
///
/// An unknown `current` moves to the first option.
#[must_use]
pub fn next_value<T: Copy + PartialEq>(options: &[OptionItem<T>], current: T) -> Option<T> {
    let pos = options.iter().position(|o| o.value == current);
    let next = pos.map_or(0, |i| (i + 1) % options.len());
    options.get(next).map(|o| o.value)
}

/// Display name of a value, if it is in the catalog
#[must_use]
pub fn display_name<T: Copy + PartialEq>(options: &[OptionItem<T>], value: T) -> Option<&'static str> {
    options.iter().find(|o| o.value == value).map(|o| o.name)
}

/// Check a word length against [`WORD_LENGTHS`]
///
/// # Errors
/// Returns a message naming the supported range.
pub fn check_word_length(len: usize) -> Result<usize, String> {
    if display_name(WORD_LENGTHS, len).is_some() {
        return Ok(len);
    }
    let min = WORD_LENGTHS.first().map_or(0, |o| o.value);
    let max = WORD_LENGTHS.last().map_or(0, |o| o.value);
    Err(format!("word length must be between {min} and {max}, got {len}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_value_wraps() {
        assert_eq!(next_value(WORD_LENGTHS, 5), Some(6));
        assert_eq!(next_value(WORD_LENGTHS, 10), Some(4));
        assert_eq!(next_value(WORD_LENGTHS, 42), Some(4));
        assert_eq!(next_value(DICTIONARIES, "en"), Some("en"));
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name(DICTIONARIES, "en"), Some("English"));
        assert_eq!(display_name(DICTIONARIES, "xx"), None);
    }

    #[test]
    fn word_length_range() {
        assert_eq!(check_word_length(4), Ok(4));
        assert_eq!(check_word_length(10), Ok(10));
        assert!(check_word_length(3).is_err());
        assert!(check_word_length(11).is_err());
    }

    #[test]
    fn empty_catalog_has_no_next() {
        let empty: &[OptionItem<usize>] = &[];
        assert_eq!(next_value(empty, 5), None);
    }
}
