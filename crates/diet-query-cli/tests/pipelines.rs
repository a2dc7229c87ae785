#![expect(clippy::expect_used, reason = "tests assert on rendered output")]

//! Rendering each pipeline stage as JSON.

use std::io::Cursor;

use diet_query::QueryCompiler;
use diet_query_cli::config::{CliConfig, Pipeline};
use diet_query_cli::run::{render, run};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn compiler() -> QueryCompiler {
    QueryCompiler::english().expect("built-in vocabulary should compile")
}

fn config(pipeline: Pipeline) -> CliConfig {
    CliConfig {
        pipeline,
        ..CliConfig::default()
    }
}

fn rendered(compiler: &QueryCompiler, config: &CliConfig, query: &str) -> Value {
    let text = render(compiler, config, query).expect("rendering should succeed");
    serde_json::from_str(&text).expect("output should be JSON")
}

#[rstest]
fn filter_output_uses_camel_case_fields(compiler: QueryCompiler) {
    let out = rendered(&compiler, &config(Pipeline::Filter), "vegan no peanuts");
    assert_eq!(out["includeDiets"], json!(["Vegan"]));
    assert_eq!(out["excludeAllergens"], json!(["peanut"]));
    assert_eq!(out["excludeAllAllergens"], json!(false));
}

#[rstest]
fn intent_output_records_the_diet_type(compiler: QueryCompiler) {
    let out = rendered(&compiler, &config(Pipeline::Intent), "keto crackers");
    assert_eq!(out["dietType"], json!("Keto"));
    assert_eq!(out["textTokens"], json!(["cracker"]));
}

#[rstest]
fn constraints_output_is_a_list(compiler: QueryCompiler) {
    let out = rendered(
        &compiler,
        &config(Pipeline::Constraints),
        "strictly between 1 and 2 fat",
    );
    assert_eq!(out.as_array().map(Vec::len), Some(2));
}

#[rstest]
fn mapped_output_lists_nutrient_goals(compiler: QueryCompiler) {
    let out = rendered(&compiler, &config(Pipeline::Mapped), "sodium under 5");
    assert_eq!(out["nutrientGoals"][0]["nutrient"], json!("sodium"));
}

#[rstest]
fn dynamic_diets_reach_the_compiler(compiler: QueryCompiler) {
    let config = CliConfig::default().apply_overrides(
        None,
        None,
        &["Nightshade-Free,Corn-Free".to_owned()],
        false,
    );
    let out = rendered(&compiler, &config, "nightshade free salsa");
    assert_eq!(out["includeDiets"], json!(["Nightshade-Free"]));
}

#[rstest]
fn stdin_queries_produce_one_line_each(compiler: QueryCompiler) {
    let mut out = Vec::new();
    let count = run(
        &compiler,
        &config(Pipeline::Intent),
        &[],
        Cursor::new("toddler snacks\nno sugar\n"),
        &mut out,
    )
    .expect("run should succeed");
    assert_eq!(count, 2);
    let text = String::from_utf8(out).expect("utf-8 output");
    let docs: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs.first().map(|d| d["targetAgeMonths"].clone()), Some(json!(24.0)));
}
