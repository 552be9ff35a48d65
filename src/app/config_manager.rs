//! Configuration lifecycle: load file config, merge CLI, resolve log level.

use std::path::PathBuf;

use anyhow::Result;

use crate::app::config_runtime::{self, CliValueSources};
use crate::app_config::load_file_config_from;
use crate::cli::{Cli, Command};

/// Resolved configuration bundle consumed by `main`.
pub(crate) struct ResolvedConfig {
    pub(crate) command: Command,
    pub(crate) log_level: &'static str,
    pub(crate) config_path: Option<PathBuf>,
}

/// Load file config, merge CLI overrides into the subcommand arguments and
/// resolve the default log level.
pub(crate) fn resolve_config(cli: &Cli, cli_sources: &CliValueSources) -> Result<ResolvedConfig> {
    let loaded = load_file_config_from(cli.config.as_deref())?;
    let file_config = loaded.config.as_ref();

    let command = match &cli.command {
        Command::Scan(args) => Command::Scan(config_runtime::apply_config_defaults(
            args.clone(),
            cli_sources,
            file_config,
        )?),
        Command::Extract(args) => Command::Extract(args.clone()),
    };

    let log_level =
        config_runtime::resolve_default_log_level(cli.verbose, cli.quiet, cli_sources, file_config);

    Ok(ResolvedConfig {
        command,
        log_level,
        config_path: loaded.path,
    })
}
