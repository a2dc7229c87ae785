//! The query compiler facade.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use diet_query_lexicon::{Lexicon, Vocabulary};

use crate::constraint::DietaryConstraint;
use crate::errors::CompileError;
use crate::extract::{ExtractionCandidate, Extractor};
use crate::filter::FoodFilter;
use crate::intent::SearchIntent;
use crate::mapper::{ConstraintMapper, ConstraintMapperResult};
use crate::normalize::{NormalizedQuery, Normalizer};
use crate::parser::ConstraintParser;
use crate::tokenizer::Tokenizer;

/// Compiles search strings against one lexicon.
///
/// Every lexicon-derived regular expression is built by [`QueryCompiler::new`];
/// the compile operations themselves are pure and never fail. Swap the
/// lexicon by building a new compiler.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use diet_query::{ConstraintValue, QueryCompiler};
///
/// let compiler = QueryCompiler::english()?;
/// let filter = compiler.compile("high protein vegan", &BTreeSet::new());
/// assert!(filter.include_diets.contains("Vegan"));
/// assert_eq!(
///     filter.goals_for("protein").next(),
///     Some(&ConstraintValue::High)
/// );
/// # Ok::<(), diet_query::CompileError>(())
/// ```
pub struct QueryCompiler {
    lexicon: Arc<dyn Lexicon>,
    normalizer: Normalizer,
    extractor: Extractor,
}

impl fmt::Debug for QueryCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCompiler")
            .field("normalizer", &self.normalizer)
            .field("extractor", &self.extractor)
            .finish_non_exhaustive()
    }
}

impl QueryCompiler {
    /// Build a compiler over `lexicon`.
    ///
    /// # Errors
    /// Returns [`CompileError::Regex`] when a phrase table yields a pattern
    /// the regex engine rejects.
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Result<Self, CompileError> {
        let normalizer = Normalizer::new(lexicon.as_ref())?;
        let extractor = Extractor::new(lexicon.as_ref())?;
        log::debug!("query compiler ready");
        Ok(Self {
            lexicon,
            normalizer,
            extractor,
        })
    }

    /// Build a compiler over the built-in English vocabulary.
    ///
    /// # Errors
    /// Returns [`CompileError::Lexicon`] if the built-in tables conflict, or
    /// [`CompileError::Regex`] as for [`QueryCompiler::new`].
    pub fn english() -> Result<Self, CompileError> {
        Self::new(Arc::new(Vocabulary::english()?))
    }

    /// The lexicon this compiler consults.
    #[must_use]
    pub fn lexicon(&self) -> &dyn Lexicon {
        self.lexicon.as_ref()
    }

    /// Run the lexical normalizer.
    #[must_use]
    pub fn normalize(&self, text: &str) -> NormalizedQuery {
        self.normalizer.normalize(text)
    }

    /// Extract constraint candidates, in text order.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<ExtractionCandidate> {
        let light = self.normalizer.normalize_light(text);
        self.extractor.extract(self.lexicon(), &light)
    }

    /// Extract and parse constraints.
    #[must_use]
    pub fn constraints(&self, text: &str) -> Vec<DietaryConstraint> {
        ConstraintParser::new(self.lexicon()).parse_all(&self.extract(text))
    }

    /// The phrase path: constraints folded by subject kind.
    #[must_use]
    pub fn map_constraints(&self, text: &str) -> ConstraintMapperResult {
        ConstraintMapper::new(self.lexicon()).map(&self.constraints(text))
    }

    /// The keyword path: one stateful pass over the normalised words.
    #[must_use]
    pub fn search_intent(&self, text: &str, dynamic_diets: &BTreeSet<String>) -> SearchIntent {
        Tokenizer::new(self.lexicon(), &self.normalizer).intent(text, dynamic_diets)
    }

    /// Run both paths and merge them into one [`FoodFilter`].
    #[must_use]
    pub fn compile(&self, text: &str, dynamic_diets: &BTreeSet<String>) -> FoodFilter {
        let mapped = self.map_constraints(text);
        let intent = self.search_intent(text, dynamic_diets);
        log::trace!("mapped {mapped:?}, intent {intent:?}");
        FoodFilter::unify(mapped, intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::english;
    use crate::value::ConstraintValue;

    fn compiler() -> QueryCompiler {
        QueryCompiler::new(Arc::new(english()))
            .unwrap_or_else(|err| panic!("compiler should build: {err}"))
    }

    #[test]
    fn compiler_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QueryCompiler>();
    }

    #[test]
    fn extraction_applies_light_normalization() {
        let found = compiler().extract("Vitamin-C < 5");
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|c| c.subject.as_str()), Some("vitamin c"));
    }

    #[test]
    fn blank_input_compiles_to_an_empty_filter() {
        let c = compiler();
        assert!(c.compile("", &BTreeSet::new()).is_empty());
        assert!(c.compile("   ", &BTreeSet::new()).is_empty());
    }

    #[test]
    fn compile_prefers_phrase_path_goals() {
        let filter = compiler().compile("sodium under 5", &BTreeSet::new());
        let sodium: Vec<_> = filter.goals_for("sodium").collect();
        assert_eq!(sodium, [&ConstraintValue::StrictMax(5.0)]);
    }

    #[test]
    fn debug_output_omits_the_lexicon() {
        let rendered = format!("{:?}", compiler());
        assert!(rendered.starts_with("QueryCompiler"));
        assert!(rendered.contains(".."));
    }
}
