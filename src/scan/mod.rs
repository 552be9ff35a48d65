//! Batch extraction over a directory tree of catalog documents.
//!
//! The bulk catalog archive unpacks into one RDF/XML document per book.
//! [`discover_documents`] finds them, and [`CorpusScanner`] runs
//! [`extract_record`] on each one, keeping a bounded number of documents
//! in flight.
//!
//! # Ordering
//!
//! Records reach the [`RecordSink`] in the order of the input paths,
//! regardless of which extraction finishes first.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use cataloger_core::scan::{CorpusScanner, DEFAULT_EXTENSION, discover_documents};
//! use cataloger_core::CatalogRecord;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let paths = discover_documents(Path::new("./data/cache/epub"), DEFAULT_EXTENSION)?;
//! let scanner = CorpusScanner::new(8)?;
//! let mut records: Vec<CatalogRecord> = Vec::new();
//! let report = scanner.scan(&paths, &mut records).await?;
//! println!("extracted {}, failed {}", report.stats.extracted(), report.stats.failed());
//! # Ok(())
//! # }
//! ```

mod discover;
mod error;

pub use discover::discover_documents;
pub use error::ScanError;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::extract::{CatalogRecord, extract_record};

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 100;

/// Default number of documents in flight.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// File extension of catalog documents in the bulk archive.
pub const DEFAULT_EXTENSION: &str = "rdf";

/// Destination for extracted records.
pub trait RecordSink {
    /// Receives one successfully extracted record.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the scan.
    fn accept(&mut self, record: CatalogRecord) -> Result<(), ScanError>;

    /// Notified for each document that failed and was skipped.
    fn on_failure(&mut self, _failure: &ScanFailure) {}
}

impl RecordSink for Vec<CatalogRecord> {
    fn accept(&mut self, record: CatalogRecord) -> Result<(), ScanError> {
        self.push(record);
        Ok(())
    }
}

/// A document that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFailure {
    /// Document path
    pub path: PathBuf,
    /// Human-readable cause
    pub reason: String,
}

/// Counters for a scan run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    extracted: usize,
    failed: usize,
}

impl ScanStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents turned into records.
    #[must_use]
    pub fn extracted(&self) -> usize {
        self.extracted
    }

    /// Number of documents skipped because of an error.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Total documents processed (extracted + failed).
    #[must_use]
    pub fn total(&self) -> usize {
        self.extracted + self.failed
    }

    fn increment_extracted(&mut self) {
        self.extracted += 1;
    }

    fn increment_failed(&mut self) {
        self.failed += 1;
    }
}

/// Outcome of [`CorpusScanner::scan`].
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Counters
    pub stats: ScanStats,
    /// Skipped documents in path order
    pub failures: Vec<ScanFailure>,
    /// Wall-clock duration of the scan
    pub elapsed: Duration,
}

/// Runs the extractor over many documents with bounded concurrency.
///
/// File reads use `tokio::fs`; extraction itself is CPU-bound and runs on
/// the blocking pool. Failed documents are logged and skipped unless
/// fail-fast mode is enabled.
#[derive(Debug, Clone)]
pub struct CorpusScanner {
    concurrency: usize,
    fail_fast: bool,
}

impl CorpusScanner {
    /// Creates a scanner with at most `concurrency` documents in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    ///
    /// # Example
    ///
    /// ```
    /// use cataloger_core::scan::CorpusScanner;
    ///
    /// assert!(CorpusScanner::new(4).is_ok());
    /// assert!(CorpusScanner::new(0).is_err());
    /// ```
    pub fn new(concurrency: usize) -> Result<Self, ScanError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(ScanError::InvalidConcurrency { value: concurrency });
        }
        Ok(Self {
            concurrency,
            fail_fast: false,
        })
    }

    /// Stops at the first failed document instead of skipping it.
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Whether the scan aborts on the first failure.
    #[must_use]
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Extracts every document in `paths` and feeds the records to `sink`.
    ///
    /// # Errors
    ///
    /// - The first document error when fail-fast mode is on
    /// - Any error returned by the sink
    /// - [`ScanError::TaskJoin`] if a blocking extraction task dies
    #[instrument(skip(self, paths, sink), fields(documents = paths.len(), concurrency = self.concurrency))]
    pub async fn scan<S>(&self, paths: &[PathBuf], sink: &mut S) -> Result<ScanReport, ScanError>
    where
        S: RecordSink + ?Sized,
    {
        let started = Instant::now();
        let mut report = ScanReport::default();

        let mut outcomes = stream::iter(paths.iter().cloned())
            .map(|path| async move {
                let outcome = extract_file(&path).await;
                (path, outcome)
            })
            .buffered(self.concurrency);

        while let Some((path, outcome)) = outcomes.next().await {
            match outcome {
                Ok(record) => {
                    debug!(path = %path.display(), id = record.id, "Extracted document");
                    report.stats.increment_extracted();
                    sink.accept(record)?;
                }
                Err(err @ ScanError::TaskJoin(_)) => return Err(err),
                Err(err) => {
                    report.stats.increment_failed();
                    warn!(path = %path.display(), error = %err, "Skipping catalog document");
                    if self.fail_fast {
                        return Err(err);
                    }
                    let failure = ScanFailure {
                        path,
                        reason: err.to_string(),
                    };
                    sink.on_failure(&failure);
                    report.failures.push(failure);
                }
            }
        }

        report.elapsed = started.elapsed();
        info!(
            extracted = report.stats.extracted(),
            failed = report.stats.failed(),
            elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
            "Scan complete"
        );
        Ok(report)
    }
}

/// Reads and extracts a single document from disk.
///
/// # Errors
///
/// [`ScanError::Io`] when the file cannot be read as UTF-8 text,
/// [`ScanError::Document`] when extraction fails.
pub async fn extract_file(path: &Path) -> Result<CatalogRecord, ScanError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    tokio::task::spawn_blocking(move || extract_record(&text))
        .await
        .map_err(|err| ScanError::TaskJoin(err.to_string()))?
        .map_err(|source| ScanError::Document {
            path: path.to_path_buf(),
            source,
        })
}
