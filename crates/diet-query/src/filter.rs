//! The single food-filtering contract both pipelines feed.

use std::collections::BTreeSet;

use diet_query_lexicon::AllergenId;

use crate::intent::SearchIntent;
use crate::mapper::ConstraintMapperResult;
use crate::value::{ConstraintValue, NutrientGoal};

/// Everything a food catalog needs to filter and rank for one query.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct FoodFilter {
    /// Nutrient goals; several may target the same nutrient.
    pub nutrient_goals: Vec<NutrientGoal>,
    /// pH goal.
    pub ph_goal: Option<ConstraintValue>,
    /// Diets the food must follow.
    pub include_diets: BTreeSet<String>,
    /// Diets the food must not follow.
    pub exclude_diets: BTreeSet<String>,
    /// Allergens the food must contain.
    pub include_allergens: BTreeSet<AllergenId>,
    /// Allergens the food must not contain.
    pub exclude_allergens: BTreeSet<AllergenId>,
    /// Exclude every known allergen.
    pub exclude_all_allergens: bool,
    /// Consumer age in months.
    pub target_age_months: Option<f64>,
    /// Free-text search terms.
    pub text_tokens: BTreeSet<String>,
    /// Free-text terms the food must not match.
    pub negative_tokens: BTreeSet<String>,
}

impl FoodFilter {
    /// Merge the phrase path and the keyword path.
    ///
    /// Phrase-path goals come first; keyword-path goals are appended only
    /// for nutrients the phrase path left untouched. The phrase path's pH
    /// goal wins. Diet and allergen sets are unions. Age, the allergen
    /// flag and free text come from the keyword path.
    #[must_use]
    pub fn unify(mapped: ConstraintMapperResult, intent: SearchIntent) -> Self {
        let covered: BTreeSet<_> = mapped
            .nutrient_goals
            .iter()
            .map(|goal| goal.nutrient.clone())
            .collect();
        let mut nutrient_goals = mapped.nutrient_goals;
        nutrient_goals.extend(
            intent
                .nutrient_goals
                .into_iter()
                .filter(|goal| !covered.contains(&goal.nutrient)),
        );

        let mut include_diets = mapped.include_diets;
        include_diets.extend(intent.diets);
        let mut exclude_diets = mapped.exclude_diets;
        exclude_diets.extend(intent.excluded_diets);
        let mut exclude_allergens = mapped.exclude_allergens;
        exclude_allergens.extend(intent.excluded_allergens);

        Self {
            nutrient_goals,
            ph_goal: mapped.ph_goal.or(intent.ph_goal),
            include_diets,
            exclude_diets,
            include_allergens: mapped.include_allergens,
            exclude_allergens,
            exclude_all_allergens: intent.exclude_all_allergens,
            target_age_months: intent.target_age_months,
            text_tokens: intent.text_tokens,
            negative_tokens: intent.negative_tokens,
        }
    }

    /// Whether the filter neither constrains nor searches anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Goals that apply to `nutrient`, in order.
    pub fn goals_for<'a>(&'a self, nutrient: &'a str) -> impl Iterator<Item = &'a ConstraintValue> + 'a {
        self.nutrient_goals
            .iter()
            .filter(move |goal| goal.nutrient.as_str() == nutrient)
            .map(|goal| &goal.value)
    }
}
