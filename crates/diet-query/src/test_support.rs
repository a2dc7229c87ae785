//! Shared fixtures for unit tests.

use diet_query_lexicon::Vocabulary;

/// The built-in English vocabulary.
pub(crate) fn english() -> Vocabulary {
    Vocabulary::english().unwrap_or_else(|err| panic!("built-in vocabulary: {err}"))
}
