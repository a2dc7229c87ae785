//! Error types raised while assembling a vocabulary.

use thiserror::Error;

/// Errors surfaced by [`VocabularyBuilder::build`](crate::VocabularyBuilder::build).
///
/// # Examples
/// ```
/// use diet_query_lexicon::LexiconError;
/// let err = LexiconError::EmptyKey { table: "diet" };
/// assert_eq!(err.to_string(), "empty key in diet table");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexiconError {
    /// A table entry normalised to an empty key.
    #[error("empty key in {table} table")]
    EmptyKey {
        /// Table the entry was added to.
        table: &'static str,
    },
    /// The same key was mapped to two different targets.
    #[error("key `{key}` in {table} table maps to both `{existing}` and `{incoming}`")]
    ConflictingKey {
        /// Table the entry was added to.
        table: &'static str,
        /// Normalised key.
        key: String,
        /// Target already registered for the key.
        existing: String,
        /// Target the new entry tried to register.
        incoming: String,
    },
}
