//! Convert lexicon phrase tables into word-bounded regular expressions.

use regex::Regex;

use crate::errors::CompileError;

/// Build an alternation matching any of `phrases` as whole words.
///
/// Phrases are escaped literally; the single spaces of a normalised phrase
/// match any run of whitespace. Callers pass phrases longest first so the
/// leftmost-first alternation prefers the most specific one. Returns `None`
/// for an empty table.
///
/// # Examples
/// ```ignore
/// let src = build_phrase_pattern(["vitamin c", "fat"]);
/// assert_eq!(src.as_deref(), Some(r"\b(?:vitamin\s+c|fat)\b"));
/// ```
pub(crate) fn build_phrase_pattern<'a>(
    phrases: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    let mut alternatives = Vec::new();
    for phrase in phrases {
        let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
        if !words.is_empty() {
            alternatives.push(words.join(r"\s+"));
        }
    }
    if alternatives.is_empty() {
        return None;
    }
    Some(format!(r"\b(?:{})\b", alternatives.join("|")))
}

/// Compile [`build_phrase_pattern`] output, if any.
///
/// # Errors
/// Returns [`CompileError::Regex`] when the alternation is too large or
/// otherwise fails to compile.
pub(crate) fn compile_phrase_regex<'a>(
    phrases: impl IntoIterator<Item = &'a str>,
) -> Result<Option<Regex>, CompileError> {
    build_phrase_pattern(phrases)
        .map(|source| Regex::new(&source))
        .transpose()
        .map_err(CompileError::from)
}

/// Collapse runs of whitespace and trim the ends.
pub(crate) fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
