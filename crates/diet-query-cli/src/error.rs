//! Error types for the command-line front end.

use diet_query::CompileError;
use thiserror::Error;

/// Errors that stop the binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The vocabulary could not be turned into a compiler.
    #[error("compiler setup failed: {0}")]
    Compile(#[from] CompileError),

    /// A result could not be rendered as JSON.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading queries or writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
