#![allow(clippy::print_stdout, clippy::print_stderr)]

mod args;
mod handlers;

use crate::args::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use fgate::domain::LoggingConfig;
use fgate_logger::{LevelFilter, Logger};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let logging = fgate::load_logging(cli.command.manifest())?;
    let _logger = init_logger(&logging, &cli)?;
    let manifest = fgate::load(cli.command.manifest())?;

    match cli.command {
        Commands::Resolve { json, order, .. } => handlers::resolve(&manifest, order.into(), json),
        Commands::Check { .. } => handlers::check(&manifest),
        Commands::Explain { feature, .. } => handlers::explain(&manifest, &feature),
    }
}

/// Installs the subscriber from the manifest's `[logging]` table, with CLI overrides.
fn init_logger(logging: &LoggingConfig, cli: &Cli) -> Result<Logger> {
    let level = cli.log_level.as_deref().unwrap_or(&logging.level);
    let level: LevelFilter = level.parse().with_context(|| format!("invalid log level '{level}'"))?;

    let mut builder = Logger::builder().level(level).ansi(logging.ansi);
    if let Some(filter) = &logging.filter {
        builder = builder.filter(filter);
    }

    let logger = match cli.log_dir.as_ref().or(logging.dir.as_ref()) {
        Some(dir) => builder.files(dir, env!("CARGO_BIN_NAME")).json(logging.json).install()?,
        None => builder.install()?,
    };
    Ok(logger)
}
