//! Keyword-path output.

use std::collections::BTreeSet;

use diet_query_lexicon::AllergenId;

use crate::value::{ConstraintValue, NutrientGoal};

/// Structured intent built by the stateful tokenizer.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct SearchIntent {
    /// Residual free-text search terms, stemmed.
    pub text_tokens: BTreeSet<String>,
    /// Free-text terms the food must not match.
    pub negative_tokens: BTreeSet<String>,
    /// Nutrient goals in the order they were read.
    pub nutrient_goals: Vec<NutrientGoal>,
    /// Diets the food must follow.
    pub diets: BTreeSet<String>,
    /// First diet mentioned.
    pub diet_type: Option<String>,
    /// Diets the food must not follow.
    pub excluded_diets: BTreeSet<String>,
    /// Consumer age in months.
    pub target_age_months: Option<f64>,
    /// Allergens the food must not contain.
    pub excluded_allergens: BTreeSet<AllergenId>,
    /// Exclude every known allergen.
    pub exclude_all_allergens: bool,
    /// pH goal.
    pub ph_goal: Option<ConstraintValue>,
}

impl SearchIntent {
    pub(crate) fn add_diet(&mut self, name: &str) {
        if self.diet_type.is_none() {
            self.diet_type = Some(name.to_owned());
        }
        self.diets.insert(name.to_owned());
    }

    pub(crate) fn add_goal(&mut self, goal: NutrientGoal) {
        log::trace!("intent goal {goal}");
        self.nutrient_goals.push(goal);
    }
}
