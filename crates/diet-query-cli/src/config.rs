//! Command-line configuration parsed from environment variables.
//!
//! Every setting can be overridden by a flag. Environment variables are
//! prefixed with `DIET_QUERY_`.

use std::collections::BTreeSet;
use std::env;
use std::str::FromStr;

use crate::error::CliError;

/// How much the CLI reports on stderr while compiling queries.
///
/// Defaults to `Warn` so JSON on stdout is not drowned by progress output
/// on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every normalizer rewrite, candidate and tokenizer decision.
    Trace,
    /// Dropped candidates, unknown subjects and the built intent.
    Debug,
    /// Startup and one line per compiled query.
    Info,
    /// Nothing unless a query or input line could not be handled.
    #[default]
    Warn,
    /// Only failures that stop the run.
    Error,
}

impl LogLevel {
    const ALL: [Self; 5] = [Self::Trace, Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// The `EnvFilter` directive for this level.
    #[must_use]
    pub const fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "warning" {
            return Ok(Self::Warn);
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_filter_str() == wanted)
            .ok_or_else(|| {
                CliError::InvalidConfig(format!(
                    "unknown log level '{s}', expected one of: {}",
                    Self::ALL.map(Self::as_filter_str).join(", ")
                ))
            })
    }
}

/// Which stage of the compiler to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pipeline {
    /// The unified food filter.
    #[default]
    Filter,
    /// The keyword path's search intent.
    Intent,
    /// Parsed constraints from the phrase path.
    Constraints,
    /// The phrase path's mapped result.
    Mapped,
}

impl FromStr for Pipeline {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "filter" => Ok(Self::Filter),
            "intent" => Ok(Self::Intent),
            "constraints" => Ok(Self::Constraints),
            "mapped" => Ok(Self::Mapped),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown pipeline '{s}', expected one of: filter, intent, constraints, mapped"
            ))),
        }
    }
}

/// Configuration for the binary.
///
/// # Environment Variables
///
/// - `DIET_QUERY_LOG_LEVEL`: trace, debug, info, warn or error
/// - `DIET_QUERY_PIPELINE`: filter, intent, constraints or mapped
/// - `DIET_QUERY_DIETS`: comma-separated `<Word>-Free` diet names
/// - `DIET_QUERY_PRETTY`: `1`/`true` to pretty-print JSON
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level.
    pub log_level: LogLevel,
    /// Stage to print.
    pub pipeline: Pipeline,
    /// Diet names known only at run time, e.g. `Nightshade-Free`.
    pub dynamic_diets: BTreeSet<String>,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

fn parse_bool(name: &str, value: &str) -> Result<bool, CliError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(CliError::InvalidConfig(format!(
            "invalid {name} value '{value}', expected true or false"
        ))),
    }
}

/// Split a comma-separated diet list, dropping blanks.
#[must_use]
pub fn parse_diet_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|diet| !diet.is_empty())
        .map(str::to_owned)
        .collect()
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let log_level = lookup("DIET_QUERY_LOG_LEVEL")
            .map(|val| val.parse::<LogLevel>())
            .transpose()?
            .unwrap_or_default();
        let pipeline = lookup("DIET_QUERY_PIPELINE")
            .map(|val| val.parse::<Pipeline>())
            .transpose()?
            .unwrap_or_default();
        let dynamic_diets = lookup("DIET_QUERY_DIETS")
            .map(|val| parse_diet_list(&val))
            .unwrap_or_default();
        let pretty = lookup("DIET_QUERY_PRETTY")
            .map(|val| parse_bool("DIET_QUERY_PRETTY", &val))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            log_level,
            pipeline,
            dynamic_diets,
            pretty,
        })
    }

    /// Apply flag overrides on top of the environment.
    ///
    /// Diets given on the command line are added to those from the
    /// environment.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        pipeline: Option<Pipeline>,
        diets: &[String],
        pretty: bool,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(pipeline) = pipeline {
            self.pipeline = pipeline;
        }
        for diet in diets {
            self.dynamic_diets.extend(parse_diet_list(diet));
        }
        self.pretty |= pretty;
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        }
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("DEBUG", LogLevel::Debug)]
    #[case("Info", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[rstest]
    #[case("filter", Pipeline::Filter)]
    #[case("Intent", Pipeline::Intent)]
    #[case("constraints", Pipeline::Constraints)]
    #[case("MAPPED", Pipeline::Mapped)]
    fn pipeline_parses_case_insensitively(#[case] input: &str, #[case] expected: Pipeline) {
        assert_eq!(input.parse::<Pipeline>().ok(), Some(expected));
    }

    #[test]
    fn unknown_values_are_rejected() {
        let Err(err) = "loud".parse::<LogLevel>() else {
            panic!("expected an invalid log level");
        };
        assert!(err.to_string().contains("unknown log level"));
        assert!("everything".parse::<Pipeline>().is_err());
    }

    #[test]
    fn log_level_errors_list_every_level() {
        let Err(err) = "verbose".parse::<LogLevel>() else {
            panic!("expected an invalid log level");
        };
        assert!(
            err.to_string()
                .ends_with("expected one of: trace, debug, info, warn, error")
        );
        assert_eq!(" Info ".parse::<LogLevel>().ok(), Some(LogLevel::Info));
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = CliConfig::from_lookup(|_| None)
            .unwrap_or_else(|err| panic!("empty environment is valid: {err}"));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.pipeline, Pipeline::Filter);
        assert!(config.dynamic_diets.is_empty());
        assert!(!config.pretty);
    }

    #[test]
    fn reads_every_variable() {
        let config = CliConfig::from_lookup(lookup_from(&[
            ("DIET_QUERY_LOG_LEVEL", "debug"),
            ("DIET_QUERY_PIPELINE", "intent"),
            ("DIET_QUERY_DIETS", "Nightshade-Free, ,Corn-Free"),
            ("DIET_QUERY_PRETTY", "yes"),
        ]))
        .unwrap_or_else(|err| panic!("valid environment: {err}"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.pipeline, Pipeline::Intent);
        assert_eq!(
            config.dynamic_diets.iter().collect::<Vec<_>>(),
            ["Corn-Free", "Nightshade-Free"]
        );
        assert!(config.pretty);
    }

    #[test]
    fn invalid_flags_in_the_environment_are_errors() {
        let result = CliConfig::from_lookup(lookup_from(&[("DIET_QUERY_PRETTY", "maybe")]));
        assert!(matches!(result, Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = CliConfig::default().apply_overrides(
            Some(LogLevel::Error),
            Some(Pipeline::Mapped),
            &["Soy-Free".to_owned()],
            true,
        );
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.pipeline, Pipeline::Mapped);
        assert!(config.dynamic_diets.contains("Soy-Free"));
        assert!(config.pretty);

        let config = CliConfig::default().apply_overrides(None, None, &[], false);
        assert_eq!(config.pipeline, Pipeline::Filter);
    }
}
