#![expect(clippy::expect_used, reason = "tests build the compiler up front")]

//! Properties of the phrase path and the keyword path taken separately.

use std::collections::BTreeSet;

use diet_query::{
    ComparisonOperator, ConstraintValue, DietaryConstraint, NEGATED_NUTRIENT_MAX, PH_ACIDIC_MAX,
    PH_ALKALINE_MIN, PH_NEUTRAL_HIGH, PH_NEUTRAL_LOW, QueryCompiler,
};
use rstest::{fixture, rstest};

#[fixture]
fn compiler() -> QueryCompiler {
    QueryCompiler::english().expect("built-in vocabulary should compile")
}

fn shape(constraints: &[DietaryConstraint]) -> Vec<(&str, ComparisonOperator, Option<f64>)> {
    constraints
        .iter()
        .map(|c| (c.subject.as_str(), c.comparison, c.value))
        .collect()
}

fn phrase_goals(compiler: &QueryCompiler, query: &str) -> Vec<(String, ConstraintValue)> {
    compiler
        .map_constraints(query)
        .nutrient_goals
        .into_iter()
        .map(|g| (g.nutrient.as_str().to_owned(), g.value))
        .collect()
}

fn keyword_goals(compiler: &QueryCompiler, query: &str) -> Vec<(String, ConstraintValue)> {
    compiler
        .search_intent(query, &BTreeSet::new())
        .nutrient_goals
        .into_iter()
        .map(|g| (g.nutrient.as_str().to_owned(), g.value))
        .collect()
}

#[rstest]
fn normalization_is_idempotent(compiler: QueryCompiler) {
    for query in [
        "High-Protein snacks under 200 kcal",
        "between 5% and 10% fat, no more than 5g sugar",
        "ph neutral purees for 9 months",
    ] {
        let once = compiler.normalize(query);
        assert_eq!(compiler.normalize(&once.text).text, once.text, "{query}");
    }
}

#[rstest]
#[case("no sugar")]
#[case("sugar free")]
#[case("sugar-free")]
#[case("without sugar")]
#[case("free of sugar")]
fn negation_is_symmetric_on_the_phrase_path(compiler: QueryCompiler, #[case] query: &str) {
    assert_eq!(
        phrase_goals(&compiler, query),
        [("sugar".to_owned(), ConstraintValue::Max(0.5))]
    );
}

#[rstest]
#[case("no sugar")]
#[case("sugar free")]
#[case("sugar-free")]
#[case("without sugar")]
#[case("free of sugar")]
fn negation_is_symmetric_on_the_keyword_path(compiler: QueryCompiler, #[case] query: &str) {
    assert_eq!(
        keyword_goals(&compiler, query),
        [(
            "sugar".to_owned(),
            ConstraintValue::StrictMax(NEGATED_NUTRIENT_MAX)
        )]
    );
}

#[rstest]
fn ranges_decompose(compiler: QueryCompiler) {
    assert_eq!(
        shape(&compiler.constraints("between 5 and 10 g fat")),
        [("fat", ComparisonOperator::GreaterThanOrEqual, Some(5.0))]
    );
    assert_eq!(
        shape(&compiler.constraints("strictly between 1 and 2 fat")),
        [
            ("fat", ComparisonOperator::GreaterThan, Some(1.0)),
            ("fat", ComparisonOperator::LessThan, Some(2.0)),
        ]
    );
    assert_eq!(
        phrase_goals(&compiler, "fat between 10 and 5"),
        [("fat".to_owned(), ConstraintValue::Range(5.0, 10.0))]
    );
}

#[rstest]
fn both_paths_agree_on_ranges(compiler: QueryCompiler) {
    let query = "between 5 and 10 vitamin c";
    let expected = [("vitamin_c".to_owned(), ConstraintValue::Range(5.0, 10.0))];
    assert_eq!(phrase_goals(&compiler, query), expected);
    assert_eq!(keyword_goals(&compiler, query), expected);
}

#[rstest]
#[case("low acid", ComparisonOperator::GreaterThanOrEqual, PH_ALKALINE_MIN)]
#[case("high acid", ComparisonOperator::LessThanOrEqual, PH_ACIDIC_MAX)]
#[case("acidity above 7", ComparisonOperator::LessThan, 7.0)]
#[case("acidity below 6", ComparisonOperator::GreaterThan, 6.0)]
#[case("ph above 7", ComparisonOperator::GreaterThan, 7.0)]
fn acidity_is_mapped_onto_ph(
    compiler: QueryCompiler,
    #[case] query: &str,
    #[case] op: ComparisonOperator,
    #[case] value: f64,
) {
    assert_eq!(shape(&compiler.constraints(query)), [("ph", op, Some(value))]);
}

#[rstest]
fn comparator_chains_split_into_separate_constraints(compiler: QueryCompiler) {
    let query = "more than 10 vitamin c more than 14 fat";
    let expected = [
        ("vitamin_c".to_owned(), ConstraintValue::StrictMin(10.0)),
        ("fat".to_owned(), ConstraintValue::StrictMin(14.0)),
    ];
    assert_eq!(phrase_goals(&compiler, query), expected);
    assert_eq!(keyword_goals(&compiler, query), expected);
}

#[rstest]
#[case("sodium under 1 g")]
#[case("sodium under 1g")]
fn units_convert_to_the_nutrient_scale(compiler: QueryCompiler, #[case] query: &str) {
    let expected = [("sodium".to_owned(), ConstraintValue::StrictMax(1000.0))];
    assert_eq!(phrase_goals(&compiler, query), expected);
    assert_eq!(keyword_goals(&compiler, query), expected);
}

#[rstest]
#[case("no vegan")]
#[case("without vegan")]
#[case("free of vegan")]
#[case("vegan free")]
fn negated_diets_are_excluded_on_both_paths(compiler: QueryCompiler, #[case] query: &str) {
    let intent = compiler.search_intent(query, &BTreeSet::new());
    assert!(intent.diets.is_empty(), "{query}: {:?}", intent.diets);
    assert_eq!(intent.excluded_diets.iter().collect::<Vec<_>>(), ["Vegan"]);

    let filter = compiler.compile(query, &BTreeSet::new());
    assert!(filter.include_diets.is_empty(), "{query}: {:?}", filter.include_diets);
    assert_eq!(filter.exclude_diets.iter().collect::<Vec<_>>(), ["Vegan"]);
}

#[rstest]
fn bare_neutral_is_a_ph_goal_on_both_paths(compiler: QueryCompiler) {
    let neutral = ConstraintValue::Range(PH_NEUTRAL_LOW, PH_NEUTRAL_HIGH);
    let intent = compiler.search_intent("neutral snacks", &BTreeSet::new());
    assert_eq!(intent.ph_goal, Some(neutral));
    assert!(intent.text_tokens.is_empty());

    let filter = compiler.compile("neutral", &BTreeSet::new());
    assert_eq!(filter.ph_goal, Some(neutral));
    assert!(filter.text_tokens.is_empty());
}

#[rstest]
fn explicit_ages_win_over_personas(compiler: QueryCompiler) {
    let intent = compiler.search_intent("toddler snacks for 3 years", &BTreeSet::new());
    assert_eq!(intent.target_age_months, Some(36.0));
    let intent = compiler.search_intent("toddler snacks", &BTreeSet::new());
    assert_eq!(intent.target_age_months, Some(24.0));
}

#[rstest]
fn keyword_path_records_the_first_diet(compiler: QueryCompiler) {
    let intent = compiler.search_intent("keto and paleo crackers", &BTreeSet::new());
    assert_eq!(intent.diet_type.as_deref(), Some("Keto"));
    assert_eq!(intent.diets.len(), 2);
}
