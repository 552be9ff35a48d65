//! Error types for corpus scanning.

use std::path::PathBuf;

use thiserror::Error;

use super::{MAX_CONCURRENCY, MIN_CONCURRENCY};
use crate::extract::ExtractError;

/// Errors that can occur while discovering or scanning catalog documents.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Corpus root does not exist
    #[error("corpus path not found: {}\n  Suggestion: Extract the catalog archive first", .0.display())]
    PathNotFound(PathBuf),

    /// Corpus root exists but is not a directory
    #[error("corpus path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Invalid concurrency value provided
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided
        value: usize,
    },

    /// A document could not be read from disk
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A document was read but extraction failed
    #[error("failed to extract '{}': {source}", .path.display())]
    Document {
        /// File being extracted
        path: PathBuf,
        /// Extraction error
        #[source]
        source: ExtractError,
    },

    /// The record sink rejected a record
    #[error("record sink failed: {0}")]
    Sink(String),

    /// A blocking extraction task panicked or was cancelled
    #[error("extraction task failed: {0}")]
    TaskJoin(String),
}

impl ScanError {
    /// Path of the document this error concerns, when there is one.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::PathNotFound(path)
            | Self::NotADirectory(path)
            | Self::Io { path, .. }
            | Self::Document { path, .. } => Some(path),
            Self::InvalidConcurrency { .. } | Self::Sink(_) | Self::TaskJoin(_) => None,
        }
    }
}
