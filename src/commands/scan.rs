//! Scan command handler: extract a whole corpus as JSON Lines.

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};

use anyhow::{Context, Result};
use cataloger_core::{CorpusScanner, discover_documents};
use tracing::{debug, info};

use crate::app::exit_handler::{ProcessExit, determine_exit_outcome};
use crate::app::progress_manager::{create_scan_progress, should_show_progress};
use crate::cli::ScanArgs;
use crate::output::{self, JsonLinesSink};

pub(crate) async fn run_scan_command(args: &ScanArgs, quiet: bool) -> Result<ProcessExit> {
    let paths = discover_documents(&args.dir, &args.extension)?;
    if paths.is_empty() {
        info!(
            dir = %args.dir.display(),
            extension = %args.extension,
            "No catalog documents found"
        );
        return Ok(ProcessExit::Success);
    }

    info!(
        documents = paths.len(),
        dir = %args.dir.display(),
        concurrency = args.concurrency,
        "Scanning catalog documents"
    );

    let scanner =
        CorpusScanner::new(usize::from(args.concurrency))?.with_fail_fast(args.fail_fast);

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path).with_context(|| {
            format!("Failed to create output file '{}'", path.display())
        })?),
        None => Box::new(io::stdout().lock()),
    };

    let progress = create_scan_progress(
        should_show_progress(args.no_progress, quiet, io::stderr().is_terminal()),
        paths.len(),
    );
    let mut sink = JsonLinesSink::new(BufWriter::new(writer), progress);

    let scanned = scanner.scan(&paths, &mut sink).await;
    let written = sink.finish()?;
    let report = scanned?;

    debug!(written, failures = report.failures.len(), "Record output flushed");
    info!("{}", output::format_scan_summary(&report));

    Ok(determine_exit_outcome(
        report.stats.extracted(),
        report.stats.failed(),
    ))
}
