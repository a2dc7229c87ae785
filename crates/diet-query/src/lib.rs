//! Dietary query compiler.
//!
//! Turns a loosely structured search string such as
//! `high protein low sodium no peanuts between 5 and 10 vitamin c vegan`
//! into a [`FoodFilter`]: per-nutrient goals, diet and allergen
//! include/exclude sets, an optional pH goal, a consumer age and the
//! residual free-text tokens.
//!
//! Two independent paths read the same text:
//!
//! - the **phrase path** normalises lightly, runs the ordered
//!   [`PatternFamily`] regexes ([`Extractor`]), turns candidates into
//!   [`DietaryConstraint`]s ([`ConstraintParser`]) and folds those by
//!   subject kind ([`ConstraintMapper`]);
//! - the **keyword path** normalises fully ([`Normalizer`]) and walks the
//!   words once with pending comparison state ([`Tokenizer`]).
//!
//! [`FoodFilter::unify`] merges the two. [`QueryCompiler`] wires everything
//! to one [`Lexicon`](diet_query_lexicon::Lexicon).

mod capture;
mod compiler;
mod constraint;
mod errors;
mod extract;
mod filter;
mod intent;
mod mapper;
mod normalize;
mod parser;
mod pattern;
mod tokenizer;
mod value;

#[cfg(test)]
mod test_support;

pub use compiler::QueryCompiler;
pub use constraint::{ComparisonOperator, DietaryConstraint};
pub use errors::CompileError;
pub use extract::{ExtractionCandidate, Extractor, PatternFamily};
pub use filter::FoodFilter;
pub use intent::SearchIntent;
pub use mapper::{
    ConstraintMapper, ConstraintMapperResult, LOW_FAT_CAP, NEGATION_FORMS, PROXIMITY_WINDOW,
    TOTAL_FAT, is_negated,
};
pub use normalize::{NormalizedQuery, Normalizer};
pub use parser::{
    ConstraintParser, PH_ACIDIC_MAX, PH_ALKALINE_MIN, PH_NEUTRAL_HIGH, PH_NEUTRAL_LOW, PH_SUBJECT,
    resolve_operator,
};
pub use tokenizer::{NEGATED_NUTRIENT_MAX, NUTRIENT_TOLERANCE, PH_TOLERANCE, Tokenizer};
pub use value::{ConstraintValue, NutrientGoal};

pub use diet_query_lexicon as lexicon;
