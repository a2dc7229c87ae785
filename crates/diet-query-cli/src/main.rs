//! `diet-query` binary: compile dietary search strings to JSON.

use std::io;

use clap::Parser;
use tracing::info;

use diet_query::QueryCompiler;
use diet_query_cli::config::{CliConfig, LogLevel, Pipeline};
use diet_query_cli::error::CliError;
use diet_query_cli::logging::init_logging;
use diet_query_cli::run::run;

/// Compile dietary search strings into structured food filters.
#[derive(Parser, Debug)]
#[command(name = "diet-query", version, about)]
struct Args {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Stage to print (filter, intent, constraints, mapped).
    #[arg(long)]
    pipeline: Option<Pipeline>,

    /// Extra `<Word>-Free` diet names; repeat or separate with commas.
    #[arg(long = "diet", value_name = "NAME")]
    diets: Vec<String>,

    /// Pretty-print JSON.
    #[arg(long)]
    pretty: bool,

    /// Queries to compile; read one per line from stdin when absent.
    queries: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "starting diet-query");

    if let Err(e) = execute(&config, &args.queries) {
        tracing::error!(error = %e, "diet-query failed");
        std::process::exit(1);
    }
}

fn build_config(args: &Args) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, args.pipeline, &args.diets, args.pretty))
}

fn execute(config: &CliConfig, queries: &[String]) -> Result<(), CliError> {
    let compiler = QueryCompiler::english()?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run(&compiler, config, queries, stdin.lock(), &mut stdout)?;
    Ok(())
}
