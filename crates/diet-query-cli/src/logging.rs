//! Structured logging for the binary.
//!
//! Logs go to stderr so stdout carries nothing but JSON. Records emitted
//! by the library crates through `log` are bridged into the same
//! subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Install the global subscriber.
///
/// If a global subscriber is already set the call is ignored; the first
/// subscriber wins.
pub fn init_logging(config: &CliConfig) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
