//! CLI output formatting: record rendering, JSON Lines sink, summaries.

use std::io::Write;

use anyhow::{Context, Result};
use cataloger_core::{CatalogRecord, RecordSink, ScanError, ScanFailure, ScanReport};
use indicatif::ProgressBar;

/// Message when `extract` was given neither files nor piped input.
pub const NO_INPUT_GUIDANCE: &str =
    "No input provided. Pass RDF files as arguments or pipe one document via stdin.";

/// Example for piping input.
pub const INPUT_PIPE_EXAMPLE: &str = "Example: cataloger extract < data/cache/epub/132/pg132.rdf";

/// Example for scanning a corpus.
pub const SCAN_EXAMPLE: &str = "Example: cataloger scan data/cache/epub -o catalog.jsonl";

/// Prints quick-start guidance to stdout.
pub fn print_quick_start_guidance() {
    for line in [NO_INPUT_GUIDANCE, INPUT_PIPE_EXAMPLE, SCAN_EXAMPLE] {
        println!("{line}");
    }
}

/// Serializes a record as pretty JSON, or as a single line when `compact`.
pub(crate) fn render_record(record: &CatalogRecord, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(record)
    } else {
        serde_json::to_string_pretty(record)
    };
    rendered.with_context(|| format!("Failed to serialize record {}", record.id))
}

/// One-line human summary of a scan.
pub(crate) fn format_scan_summary(report: &ScanReport) -> String {
    format!(
        "Extracted {} of {} documents ({} failed) in {:.1}s",
        report.stats.extracted(),
        report.stats.total(),
        report.stats.failed(),
        report.elapsed.as_secs_f64()
    )
}

/// Writes each record as one JSON object per line and ticks the progress bar.
pub(crate) struct JsonLinesSink<W: Write> {
    writer: W,
    progress: Option<ProgressBar>,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub(crate) fn new(writer: W, progress: Option<ProgressBar>) -> Self {
        Self {
            writer,
            progress,
            written: 0,
        }
    }

    /// Flushes the writer, clears the progress bar and returns the number of records written.
    pub(crate) fn finish(mut self) -> Result<usize> {
        if let Some(progress) = self.progress.take() {
            progress.finish_and_clear();
        }
        self.writer.flush().context("Failed to flush record output")?;
        Ok(self.written)
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn accept(&mut self, record: CatalogRecord) -> Result<(), ScanError> {
        serde_json::to_writer(&mut self.writer, &record)
            .map_err(|err| ScanError::Sink(err.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|err| ScanError::Sink(err.to_string()))?;
        self.written += 1;
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
        Ok(())
    }

    fn on_failure(&mut self, failure: &ScanFailure) {
        if let Some(progress) = &self.progress {
            progress.inc(1);
            let name = failure
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            progress.set_message(format!("(skipped {name})"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cataloger_core::SourceFile;
    use std::path::PathBuf;
    use std::time::Duration;

    fn record(id: u64) -> CatalogRecord {
        CatalogRecord {
            id,
            title: format!("Book {id}"),
            sources: vec![SourceFile::new("R1", "text/plain")],
            ..CatalogRecord::default()
        }
    }

    #[test]
    fn test_render_record_compact_is_single_line() {
        let out = render_record(&record(1), true).unwrap();
        assert!(!out.contains('\n'));
        assert!(out.starts_with("{\"id\":1,"));
    }

    #[test]
    fn test_render_record_pretty_round_trips() {
        let out = render_record(&record(2), false).unwrap();
        assert!(out.contains('\n'));
        let parsed: CatalogRecord = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, record(2));
    }

    #[test]
    fn test_json_lines_sink_writes_one_record_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new(), None);
        sink.accept(record(1)).unwrap();
        sink.accept(record(2)).unwrap();
        sink.on_failure(&ScanFailure {
            path: PathBuf::from("bad.rdf"),
            reason: "x".to_string(),
        });
        let JsonLinesSink { writer, .. } = sink;
        let text = String::from_utf8(writer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: CatalogRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_json_lines_sink_finish_reports_count() {
        let mut sink = JsonLinesSink::new(Vec::new(), None);
        sink.accept(record(1)).unwrap();
        assert_eq!(sink.finish().unwrap(), 1);
    }

    #[test]
    fn test_format_scan_summary() {
        let report = ScanReport {
            elapsed: Duration::from_millis(1500),
            ..ScanReport::default()
        };
        assert_eq!(
            format_scan_summary(&report),
            "Extracted 0 of 0 documents (0 failed) in 1.5s"
        );
    }
}
