//! Subject cleaning and validation.

use diet_query_lexicon::{Lexicon, normalize_key};

/// Words stripped from either edge of a captured subject.
const EDGE_NOISE: &[&str] = &[
    "the", "a", "an", "of", "some", "my", "any", "added", "artificial", "extra", "refined", "in",
    "with", "and", "or", "is", "are",
];

/// Clean a captured subject and resolve it against the lexicon.
///
/// Punctuation and `_` become spaces, noise words are trimmed from both
/// edges and subject aliases are applied. Returns `None` when nothing the
/// lexicon recognises remains.
pub(crate) fn clean_subject(raw: &str, lexicon: &dyn Lexicon) -> Option<String> {
    let spaced: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let words: Vec<&str> = spaced.split_whitespace().collect();
    let start = words.iter().position(|w| !EDGE_NOISE.contains(w))?;
    let end = words.iter().rposition(|w| !EDGE_NOISE.contains(w))?;
    let key = normalize_key(&words.get(start..=end)?.join(" "));
    let subject = lexicon.subject_alias(&key).map_or(key, ToOwned::to_owned);
    if lexicon.is_recognized_subject(&subject) {
        Some(subject)
    } else {
        log::trace!("dropping unrecognised subject {raw:?}");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::english;
    use rstest::rstest;

    #[rstest]
    #[case("vitamin_c", Some("vitamin c"))]
    #[case("(sodium),", Some("sodium"))]
    #[case("the protein", Some("protein"))]
    #[case("b12", Some("vitamin b12"))]
    #[case("Peanuts", Some("peanuts"))]
    #[case("tomatoes", None)]
    #[case("of", None)]
    fn cleans_and_validates(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(clean_subject(raw, &english()).as_deref(), expected);
    }
}
