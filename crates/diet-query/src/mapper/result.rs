//! Aggregate produced by the constraint mapper.

use std::collections::BTreeSet;

use diet_query_lexicon::AllergenId;

use crate::value::{ConstraintValue, NutrientGoal};

/// Constraints folded by subject kind.
///
/// Nutrient goals keep input order and are never merged; two constraints
/// on the same nutrient both appear.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ConstraintMapperResult {
    /// Nutrient goals in input order.
    pub nutrient_goals: Vec<NutrientGoal>,
    /// pH goal; the last pH constraint wins.
    pub ph_goal: Option<ConstraintValue>,
    /// Diets the food must follow.
    pub include_diets: BTreeSet<String>,
    /// Diets the food must not follow.
    pub exclude_diets: BTreeSet<String>,
    /// Allergens the food must contain.
    pub include_allergens: BTreeSet<AllergenId>,
    /// Allergens the food must not contain.
    pub exclude_allergens: BTreeSet<AllergenId>,
}

impl ConstraintMapperResult {
    /// Whether nothing was mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nutrient_goals.is_empty()
            && self.ph_goal.is_none()
            && self.include_diets.is_empty()
            && self.exclude_diets.is_empty()
            && self.include_allergens.is_empty()
            && self.exclude_allergens.is_empty()
    }
}
