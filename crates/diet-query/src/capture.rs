//! Regex capture helpers shared by the extractor and the normalizer.

use regex::Captures;

/// Return a named capture group as text, treating an empty match as absent.
#[must_use]
pub(crate) fn named<'h>(caps: &Captures<'h>, name: &str) -> Option<&'h str> {
    caps.name(name)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Parse a captured number, ignoring thousands separators.
///
/// # Examples
/// ```ignore
/// assert_eq!(parse_number("1,000.5"), Some(1000.5));
/// assert_eq!(parse_number("abc"), None);
/// ```
#[must_use]
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split a word into a leading number and the suffix after it.
///
/// `"5g"` yields `(5.0, "g")` and `"10_percent"` yields `(10.0, "_percent")`.
/// Words that do not start with a digit yield `None`.
#[must_use]
pub(crate) fn split_number(word: &str) -> Option<(f64, &str)> {
    let end = word
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(word.len(), |(idx, _)| idx);
    let number = word.get(..end)?;
    let suffix = word.get(end..)?;
    if !number.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    parse_number(number.trim_end_matches('.')).map(|value| (value, suffix))
}
