use anyhow::{Result, bail};
use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::{Cli, ScanArgs};

/// Which options were given explicitly on the command line (and so beat the config file).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
    pub(crate) concurrency: bool,
    pub(crate) extension: bool,
    pub(crate) fail_fast: bool,
    pub(crate) no_progress: bool,
}

pub(crate) fn parse_cli_with_sources() -> (Cli, CliValueSources) {
    let command = Cli::command();
    let matches = command.get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    let sources = value_sources(&matches);
    (cli, sources)
}

fn value_sources(matches: &ArgMatches) -> CliValueSources {
    let mut sources = CliValueSources {
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
        ..CliValueSources::default()
    };

    if let Some(scan) = matches.subcommand_matches("scan") {
        sources.concurrency = is_commandline_value(scan, "concurrency");
        sources.extension = is_commandline_value(scan, "extension");
        sources.fail_fast = is_commandline_value(scan, "fail_fast");
        sources.no_progress = is_commandline_value(scan, "no_progress");
    }
    sources
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

pub(crate) fn apply_config_defaults(
    mut args: ScanArgs,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Result<ScanArgs> {
    if let Some(file_config) = file_config {
        if !cli_sources.concurrency
            && let Some(concurrency) = file_config.concurrency
        {
            args.concurrency = concurrency;
        }

        if !cli_sources.extension
            && let Some(extension) = &file_config.extension
        {
            args.extension = extension.clone();
        }

        if !cli_sources.fail_fast
            && let Some(fail_fast) = file_config.fail_fast
        {
            args.fail_fast = fail_fast;
        }

        if !cli_sources.no_progress
            && let Some(progress) = file_config.progress
        {
            args.no_progress = !progress;
        }
    }

    if !(1..=100).contains(&args.concurrency) {
        bail!(
            "Invalid effective concurrency value: {}. Expected range: 1..=100",
            args.concurrency
        );
    }

    Ok(args)
}

/// Default log filter when `RUST_LOG` is not set.
///
/// Priority: quiet flag > verbose flag > config verbosity > info.
pub(crate) fn resolve_default_log_level(
    verbose: u8,
    quiet: bool,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> &'static str {
    if quiet {
        return "error";
    }
    if verbose > 0 {
        return match verbose {
            1 => "debug",
            _ => "trace",
        };
    }
    if !cli_sources.verbose
        && !cli_sources.quiet
        && let Some(verbosity) = file_config.and_then(|config| config.verbosity)
    {
        return verbosity.log_level();
    }
    VerbositySetting::Default.log_level()
}
