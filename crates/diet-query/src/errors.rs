//! Error types raised while preparing a compiler.
//!
//! Compiling a query never fails; only building the lexicon-derived
//! regular expressions can.

use diet_query_lexicon::LexiconError;
use thiserror::Error;

/// Errors surfaced while constructing a [`QueryCompiler`](crate::QueryCompiler).
///
/// # Examples
/// ```
/// use diet_query::CompileError;
/// let err = CompileError::Regex(regex::Error::Syntax("bad".into()));
/// assert!(err.to_string().contains("bad"));
/// ```
#[derive(Debug, Error)]
pub enum CompileError {
    /// A pattern assembled from lexicon phrases failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
    /// The vocabulary itself is inconsistent.
    #[error("invalid vocabulary: {0}")]
    Lexicon(#[from] LexiconError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_regex_error_display() {
        let err = CompileError::Regex(regex::Error::Syntax("bad".into()));
        assert_eq!(
            err.to_string(),
            regex::Error::Syntax("bad".into()).to_string()
        );
    }

    #[test]
    fn prefixes_lexicon_errors() {
        let err = CompileError::from(LexiconError::EmptyKey { table: "diet" });
        assert_eq!(err.to_string(), "invalid vocabulary: empty key in diet table");
    }
}
