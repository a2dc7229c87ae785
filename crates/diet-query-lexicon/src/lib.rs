//! Knowledge-base contract for the diet-query compiler.
//!
//! The compiler never owns its vocabulary. It consumes a [`Lexicon`]: a
//! read-only set of lookups mapping surface words to nutrients, diets,
//! allergens and acidity terms, plus the phrase tables that drive text
//! normalisation. [`Vocabulary`] is the table-backed implementation and
//! [`Vocabulary::english`] the built-in English word list.

mod english;
mod errors;
mod ids;
mod marker;
mod unit;
mod vocabulary;

pub use errors::LexiconError;
pub use ids::{AllergenId, Nutrient, NutrientId, NutrientScale};
pub use marker::{MarkerParseError, OperatorMarker, PhMarker, PhTerm};
pub use unit::{Unit, UnitParseError};
pub use vocabulary::{Vocabulary, VocabularyBuilder, normalize_key};

/// Semantic kind of a normalised constraint subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectKind {
    /// A nutrient with its canonical identifier.
    Nutrient(NutrientId),
    /// The acidity / pH axis.
    Ph,
    /// A diet with its display name, e.g. `Vegan`.
    Diet(String),
    /// An allergen with its canonical identifier.
    Allergen(AllergenId),
    /// Not a recognised subject.
    Unknown,
}

/// Read-only lookups the compiler consults.
///
/// Implementations must be immutable for the duration of a compile call.
/// Word lookups are expected to ignore case and to treat `_` and `-` as
/// spaces, so a protected token such as `vitamin_c` resolves like
/// `vitamin c`.
pub trait Lexicon: Send + Sync {
    /// Nutrient for an exact word or multi-word phrase.
    fn nutrient(&self, word: &str) -> Option<&Nutrient>;

    /// Multi-word nutrient phrases, e.g. `vitamin c`.
    fn nutrient_phrases(&self) -> &[String];

    /// Diet display name for a diet keyword or synonym.
    fn diet(&self, word: &str) -> Option<&str>;

    /// Diet implied by excluding an ingredient, e.g. `meat` → `Vegetarian`.
    fn ingredient_diet(&self, word: &str) -> Option<&str>;

    /// Multi-word diet phrases, e.g. `gluten free`.
    fn diet_phrases(&self) -> &[String];

    /// Allergen for an alias such as `peanuts`.
    fn allergen(&self, word: &str) -> Option<&AllergenId>;

    /// Acidity role of a word, if any.
    fn ph_term(&self, word: &str) -> Option<PhTerm>;

    /// Multi-word acidity idioms and their resolved marker.
    fn ph_phrases(&self) -> &[(String, PhMarker)];

    /// Operator phrases such as `at least` or `no more than`.
    fn operator_phrases(&self) -> &[(String, OperatorMarker)];

    /// Comparative adjectives that act as operators before a number.
    fn comparative_adjectives(&self) -> &[(String, OperatorMarker)];

    /// Whether the word carries no meaning for filtering.
    fn is_stop_word(&self, word: &str) -> bool;

    /// Target age in months implied by a persona word such as `toddler`.
    fn persona_age_months(&self, word: &str) -> Option<f64>;

    /// Irregular stem for a free-text word, e.g. `berries` → `berry`.
    fn stem_exception(&self, word: &str) -> Option<&str>;

    /// Preferred spelling for a free-text word.
    fn synonym(&self, word: &str) -> Option<&str>;

    /// Canonical subject for an alias, e.g. `b12` → `vitamin b12`.
    fn subject_alias(&self, word: &str) -> Option<&str>;

    /// Classify a normalised subject.
    ///
    /// Nutrients win over acidity terms, which win over diets, which win
    /// over allergens.
    fn classify(&self, subject: &str) -> SubjectKind {
        if let Some(nutrient) = self.nutrient(subject) {
            return SubjectKind::Nutrient(nutrient.id.clone());
        }
        if self.ph_term(subject).is_some() {
            return SubjectKind::Ph;
        }
        if let Some(diet) = self.diet(subject) {
            return SubjectKind::Diet(diet.to_owned());
        }
        self.allergen(subject)
            .map_or(SubjectKind::Unknown, |id| SubjectKind::Allergen(id.clone()))
    }

    /// Whether the subject names anything the compiler can constrain.
    fn is_recognized_subject(&self, subject: &str) -> bool {
        !matches!(self.classify(subject), SubjectKind::Unknown)
    }
}
