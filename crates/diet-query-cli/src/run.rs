//! Compile queries and write one JSON document per query.

use std::io::{BufRead, Write};

use diet_query::QueryCompiler;
use serde::Serialize;

use crate::config::{CliConfig, Pipeline};
use crate::error::CliError;

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Render the configured pipeline stage for `query` as JSON.
///
/// # Errors
///
/// Returns `CliError::Json` if serialisation fails.
pub fn render(compiler: &QueryCompiler, config: &CliConfig, query: &str) -> Result<String, CliError> {
    let pretty = config.pretty;
    match config.pipeline {
        Pipeline::Filter => to_json(&compiler.compile(query, &config.dynamic_diets), pretty),
        Pipeline::Intent => to_json(
            &compiler.search_intent(query, &config.dynamic_diets),
            pretty,
        ),
        Pipeline::Constraints => to_json(&compiler.constraints(query), pretty),
        Pipeline::Mapped => to_json(&compiler.map_constraints(query), pretty),
    }
}

/// Compile `queries`, or every non-blank line of `input` when `queries`
/// is empty, writing each result to `out`.
///
/// Returns the number of queries compiled.
///
/// # Errors
///
/// Returns `CliError::Io` if reading or writing fails and `CliError::Json`
/// if a result cannot be serialised.
pub fn run<R: BufRead, W: Write>(
    compiler: &QueryCompiler,
    config: &CliConfig,
    queries: &[String],
    input: R,
    out: &mut W,
) -> Result<usize, CliError> {
    let mut count = 0;
    let mut emit = |query: &str, out: &mut W| -> Result<(), CliError> {
        tracing::debug!(query, pipeline = ?config.pipeline, "compiling query");
        let json = render(compiler, config, query)?;
        writeln!(out, "{json}")?;
        count += 1;
        Ok(())
    };

    if queries.is_empty() {
        for line in input.lines() {
            let line = line?;
            let query = line.trim();
            if !query.is_empty() {
                emit(query, out)?;
            }
        }
    } else {
        for query in queries {
            emit(query, out)?;
        }
    }
    out.flush()?;
    tracing::info!(count, "compiled queries");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn compiler() -> QueryCompiler {
        QueryCompiler::english().unwrap_or_else(|err| panic!("compiler: {err}"))
    }

    fn output(config: &CliConfig, queries: &[String], stdin: &str) -> (usize, String) {
        let mut out = Vec::new();
        let count = run(&compiler(), config, queries, Cursor::new(stdin), &mut out)
            .unwrap_or_else(|err| panic!("run should succeed: {err}"));
        let text = String::from_utf8(out).unwrap_or_else(|err| panic!("utf-8 output: {err}"));
        (count, text)
    }

    #[test]
    fn arguments_take_precedence_over_stdin() {
        let (count, text) = output(
            &CliConfig::default(),
            &["vegan".to_owned()],
            "ignored\n",
        );
        assert_eq!(count, 1);
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"includeDiets\":[\"Vegan\"]"), "{text}");
    }

    #[test]
    fn reads_one_query_per_non_blank_line() {
        let (count, text) = output(&CliConfig::default(), &[], "vegan\n\n  keto  \n");
        assert_eq!(count, 2);
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn pretty_output_spans_several_lines() {
        let config = CliConfig {
            pretty: true,
            ..CliConfig::default()
        };
        let (_, text) = output(&config, &["vegan".to_owned()], "");
        assert!(text.lines().count() > 1);
    }
}
