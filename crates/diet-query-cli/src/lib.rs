//! Command-line front end for the diet-query compiler.
//!
//! Reads search strings from arguments or stdin and writes one JSON
//! document per query to stdout. Any pipeline stage can be printed: the
//! unified filter, the keyword-path intent, the parsed constraints or the
//! mapped phrase-path result.
//!
//! # Configuration
//!
//! - `DIET_QUERY_LOG_LEVEL`: log verbosity (trace, debug, info, warn, error)
//! - `DIET_QUERY_PIPELINE`: stage to print (filter, intent, constraints,
//!   mapped)
//! - `DIET_QUERY_DIETS`: comma-separated `<Word>-Free` diets known at run
//!   time
//! - `DIET_QUERY_PRETTY`: pretty-print JSON
//!
//! Flags override the environment.

pub mod config;
pub mod error;
pub mod logging;
pub mod run;
