//! CLI entry point for the cataloger tool.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use tracing::debug;

mod app;
mod app_config;
mod cli;
mod commands;
mod output;

use app::config_manager::resolve_config;
use app::config_runtime::parse_cli_with_sources;
use cli::Command;
use commands::{run_extract_command, run_scan_command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let (cli, cli_sources) = parse_cli_with_sources();
    let resolved = resolve_config(&cli, &cli_sources)?;

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(resolved.log_level));

    // Records go to stdout; logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?cli, config = ?resolved.config_path, "CLI arguments parsed");

    let outcome = match &resolved.command {
        Command::Extract(args) => run_extract_command(args)?,
        Command::Scan(args) => run_scan_command(args, cli.quiet).await?,
    };

    Ok(ExitCode::from(outcome.code()))
}
