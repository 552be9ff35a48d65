//! Extract command handler: one record per input document.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cataloger_core::{CatalogRecord, extract_record};
use tracing::{debug, error, info};

use crate::app::exit_handler::{ProcessExit, determine_exit_outcome};
use crate::cli::ExtractArgs;
use crate::output;

pub(crate) fn run_extract_command(args: &ExtractArgs) -> Result<ProcessExit> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.files.is_empty() {
        if io::stdin().is_terminal() {
            output::print_quick_start_guidance();
            return Ok(ProcessExit::Success);
        }

        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read catalog document from stdin")?;
        if buffer.trim().is_empty() {
            info!("Received empty stdin input");
            output::print_quick_start_guidance();
            return Ok(ProcessExit::Success);
        }

        let record = extract_record(&buffer).context("Failed to extract record from stdin")?;
        writeln!(out, "{}", output::render_record(&record, args.compact)?)?;
        return Ok(ProcessExit::Success);
    }

    let mut extracted = 0usize;
    let mut failed = 0usize;
    for path in &args.files {
        match extract_path(path) {
            Ok(record) => {
                debug!(path = %path.display(), %record, "Extracted document");
                writeln!(out, "{}", output::render_record(&record, args.compact)?)?;
                extracted += 1;
            }
            Err(err) => {
                error!(path = %path.display(), error = %format!("{err:#}"), "Failed to extract catalog document");
                failed += 1;
            }
        }
    }
    out.flush()?;

    Ok(determine_exit_outcome(extracted, failed))
}

fn extract_path(path: &Path) -> Result<CatalogRecord> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    extract_record(&text).with_context(|| format!("Failed to extract '{}'", path.display()))
}
