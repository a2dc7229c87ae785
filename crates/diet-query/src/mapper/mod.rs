//! Constraint mapper: flat constraints to a [`ConstraintMapperResult`].

mod negation;
mod result;

use diet_query_lexicon::{Lexicon, NutrientScale, SubjectKind, Unit};

pub use negation::{NEGATION_FORMS, PROXIMITY_WINDOW, is_negated};
pub use result::ConstraintMapperResult;

use crate::constraint::{ComparisonOperator, DietaryConstraint};
use crate::value::{ConstraintValue, NutrientGoal};

/// Nutrient whose qualitative "low" is a fixed cap rather than a bias.
pub const TOTAL_FAT: &str = "fat";
/// Cap applied to "low fat", in grams.
pub const LOW_FAT_CAP: f64 = 12.0;

/// Folds constraints by subject kind against one lexicon.
pub struct ConstraintMapper<'a> {
    lexicon: &'a dyn Lexicon,
}

fn is_zero(value: Option<f64>) -> bool {
    value.is_some_and(|v| v.abs() < f64::EPSILON)
}

/// `lowest`/`least` and `highest`/`most` anywhere in `text`, except in
/// `at least`/`at most`.
fn superlative(text: &str) -> Option<ConstraintValue> {
    let mut previous = "";
    for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        match word {
            "lowest" => return Some(ConstraintValue::Lowest),
            "highest" => return Some(ConstraintValue::Highest),
            "least" if previous != "at" => return Some(ConstraintValue::Lowest),
            "most" if previous != "at" => return Some(ConstraintValue::Highest),
            _ => previous = word,
        }
    }
    None
}

/// Presence requested for a diet or allergen: include, exclude, or
/// nothing usable. Textual negation always excludes.
fn presence(constraint: &DietaryConstraint) -> Option<bool> {
    if is_negated(&constraint.original_text, &constraint.subject) {
        return Some(false);
    }
    match constraint.comparison {
        ComparisonOperator::GreaterThan | ComparisonOperator::GreaterThanOrEqual => Some(true),
        ComparisonOperator::Equal => constraint.value.map(|v| !is_zero(Some(v))),
        ComparisonOperator::LessThan | ComparisonOperator::LessThanOrEqual => Some(false),
        ComparisonOperator::NotEqual | ComparisonOperator::Unknown => None,
    }
}

impl<'a> ConstraintMapper<'a> {
    /// Create a mapper over `lexicon`.
    #[must_use]
    pub fn new(lexicon: &'a dyn Lexicon) -> Self {
        Self { lexicon }
    }

    /// Fold `constraints` into one result.
    ///
    /// Unknown subjects and constraints without a usable value are dropped.
    #[must_use]
    pub fn map(&self, constraints: &[DietaryConstraint]) -> ConstraintMapperResult {
        let mut result = ConstraintMapperResult::default();
        for constraint in constraints {
            match self.lexicon.classify(&constraint.subject) {
                SubjectKind::Nutrient(id) => {
                    let scale = self
                        .lexicon
                        .nutrient(&constraint.subject)
                        .map_or(NutrientScale::Gram, |n| n.scale);
                    let Some(value) = nutrient_value(constraint, id.as_str(), scale) else {
                        log::debug!("no nutrient goal for {:?}", constraint.original_text);
                        continue;
                    };
                    result.nutrient_goals.push(NutrientGoal::new(id, value));
                }
                SubjectKind::Ph => {
                    let Some(value) = constraint.value else {
                        log::debug!("abstract pH constraint {:?}", constraint.original_text);
                        continue;
                    };
                    let goal = ConstraintValue::from_comparison(
                        constraint.comparison,
                        value,
                        constraint.value2,
                    );
                    result.ph_goal = goal.or(result.ph_goal);
                }
                SubjectKind::Diet(name) => match presence(constraint) {
                    Some(true) => {
                        result.include_diets.insert(name);
                    }
                    Some(false) => {
                        result.exclude_diets.insert(name);
                    }
                    None => log::debug!("no diet rule for {:?}", constraint.original_text),
                },
                SubjectKind::Allergen(id) => match presence(constraint) {
                    Some(true) => {
                        result.include_allergens.insert(id);
                    }
                    Some(false) => {
                        result.exclude_allergens.insert(id);
                    }
                    None => log::debug!("no allergen rule for {:?}", constraint.original_text),
                },
                SubjectKind::Unknown => {
                    log::debug!("dropping unknown subject {:?}", constraint.subject);
                }
            }
        }
        result
    }
}

fn nutrient_value(
    constraint: &DietaryConstraint,
    id: &str,
    scale: NutrientScale,
) -> Option<ConstraintValue> {
    let op = constraint.comparison;
    if is_negated(&constraint.original_text, &constraint.subject)
        || (op == ComparisonOperator::Equal && is_zero(constraint.value))
    {
        return Some(ConstraintValue::Max(scale.soft_zero()));
    }
    if let Some(value) = constraint.value {
        let unit = constraint
            .unit
            .as_deref()
            .and_then(|u| u.parse::<Unit>().ok());
        let convert = |v: f64| unit.map_or(v, |u| u.convert(v, scale));
        return ConstraintValue::from_comparison(op, convert(value), constraint.value2.map(convert));
    }
    if let Some(extreme) = superlative(&constraint.original_text) {
        return Some(extreme);
    }
    if op.is_downward() {
        return Some(if id == TOTAL_FAT {
            ConstraintValue::Max(LOW_FAT_CAP)
        } else {
            ConstraintValue::Low
        });
    }
    (op.is_upward() || op == ComparisonOperator::Equal).then_some(ConstraintValue::High)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::english;
    use rstest::rstest;

    fn map(constraints: &[DietaryConstraint]) -> ConstraintMapperResult {
        let vocab = english();
        ConstraintMapper::new(&vocab).map(constraints)
    }

    fn c(text: &str, subject: &str, op: ComparisonOperator) -> DietaryConstraint {
        DietaryConstraint::new(text, subject, op)
    }

    fn goals(result: &ConstraintMapperResult) -> Vec<(&str, ConstraintValue)> {
        result
            .nutrient_goals
            .iter()
            .map(|g| (g.nutrient.as_str(), g.value))
            .collect()
    }

    #[rstest]
    #[case("sugar", 0.5)]
    #[case("sodium", 5.0)]
    #[case("vitamin d", 50.0)]
    #[case("calories", 5.0)]
    fn negation_uses_the_soft_zero_of_the_scale(#[case] subject: &str, #[case] zero: f64) {
        let text = format!("no {subject}");
        let out = map(&[c(&text, subject, ComparisonOperator::Equal).with_value(0.0)]);
        assert_eq!(
            out.nutrient_goals.first().map(|g| g.value),
            Some(ConstraintValue::Max(zero))
        );
    }

    #[rstest]
    #[case(ComparisonOperator::GreaterThan, None, ConstraintValue::StrictMin(10.0))]
    #[case(ComparisonOperator::GreaterThanOrEqual, None, ConstraintValue::Min(10.0))]
    #[case(ComparisonOperator::GreaterThanOrEqual, Some(20.0), ConstraintValue::Range(10.0, 20.0))]
    #[case(ComparisonOperator::LessThan, None, ConstraintValue::StrictMax(10.0))]
    #[case(ComparisonOperator::LessThanOrEqual, None, ConstraintValue::Max(10.0))]
    #[case(ComparisonOperator::Equal, None, ConstraintValue::Range(10.0, 10.0))]
    #[case(ComparisonOperator::NotEqual, None, ConstraintValue::NotEqual(10.0))]
    fn numeric_nutrient_constraints_pass_through(
        #[case] op: ComparisonOperator,
        #[case] value2: Option<f64>,
        #[case] expected: ConstraintValue,
    ) {
        let mut constraint = c("protein", "protein", op).with_value(10.0);
        constraint.value2 = value2;
        assert_eq!(goals(&map(&[constraint])), [("protein", expected)]);
    }

    #[test]
    fn converts_mass_units_into_the_nutrient_scale() {
        let constraint = c("sodium < 1 g", "sodium", ComparisonOperator::LessThan)
            .with_value(1.0)
            .with_unit(Some("g".to_owned()));
        assert_eq!(
            goals(&map(&[constraint])),
            [("sodium", ConstraintValue::StrictMax(1000.0))]
        );
    }

    #[rstest]
    #[case("low sodium", "sodium", ComparisonOperator::LessThan, ConstraintValue::Low)]
    #[case("low fat", "fat", ComparisonOperator::LessThan, ConstraintValue::Max(LOW_FAT_CAP))]
    #[case("high protein", "protein", ComparisonOperator::GreaterThan, ConstraintValue::High)]
    #[case("lowest sugar", "sugar", ComparisonOperator::LessThan, ConstraintValue::Lowest)]
    #[case("most fiber", "fiber", ComparisonOperator::GreaterThan, ConstraintValue::Highest)]
    #[case("at least some fiber", "fiber", ComparisonOperator::GreaterThanOrEqual, ConstraintValue::High)]
    fn abstract_nutrients_resolve_to_defaults(
        #[case] text: &str,
        #[case] subject: &str,
        #[case] op: ComparisonOperator,
        #[case] expected: ConstraintValue,
    ) {
        let out = map(&[c(text, subject, op)]);
        assert_eq!(out.nutrient_goals.first().map(|g| g.value), Some(expected));
    }

    #[test]
    fn keeps_every_goal_in_input_order() {
        let out = map(&[
            c("high sodium", "sodium", ComparisonOperator::GreaterThan),
            c("low sodium", "sodium", ComparisonOperator::LessThan),
        ]);
        assert_eq!(
            goals(&out),
            [("sodium", ConstraintValue::High), ("sodium", ConstraintValue::Low)]
        );
    }

    #[test]
    fn diets_and_allergens_follow_presence() {
        let out = map(&[
            c("vegan", "vegan", ComparisonOperator::GreaterThanOrEqual).with_value(1.0),
            c("not keto", "keto", ComparisonOperator::GreaterThanOrEqual).with_value(1.0),
            c("no peanuts", "peanuts", ComparisonOperator::Equal).with_value(0.0),
            c("soy", "soy", ComparisonOperator::GreaterThanOrEqual).with_value(1.0),
        ]);
        assert_eq!(out.include_diets.iter().collect::<Vec<_>>(), ["Vegan"]);
        assert_eq!(out.exclude_diets.iter().collect::<Vec<_>>(), ["Keto"]);
        assert_eq!(
            out.exclude_allergens.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
            ["peanut"]
        );
        assert_eq!(
            out.include_allergens.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
            ["soy"]
        );
    }

    #[test]
    fn last_ph_constraint_wins() {
        let out = map(&[
            c("low acid", "ph", ComparisonOperator::GreaterThanOrEqual).with_value(7.0),
            c("acidic", "ph", ComparisonOperator::LessThanOrEqual).with_value(6.0),
        ]);
        assert_eq!(out.ph_goal, Some(ConstraintValue::Max(6.0)));
    }

    #[test]
    fn unknown_subjects_are_dropped() {
        let out = map(&[c("more bananas", "bananas", ComparisonOperator::GreaterThan)]);
        assert!(out.is_empty());
    }
}
