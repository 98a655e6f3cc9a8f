use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod config;
mod error;
mod logging;
mod models;
mod services;

use crate::cli::Cli;
use crate::config::Config;
use crate::services::file_processor;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // .env may set RUST_LOG, so it is loaded before logging starts
    let env_file = Config::load_env_file();
    logging::init_logging(logging::level_from_flags(cli.verbose, cli.quiet))?;
    if let Some(path) = env_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    // Load configuration
    let config = Config::from_cli(cli).context("Failed to load configuration")?;
    tracing::info!(
        "Normalizing {} input file(s) into {}",
        config.inputs.len(),
        config.output.display()
    );

    let summary = file_processor::run(&config).context("Failed to normalize price lists")?;
    if summary.records_written == 0 {
        tracing::warn!("Output contains no records; check the column names of the inputs");
    }

    Ok(())
}
