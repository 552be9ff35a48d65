//! Error types for catalog record extraction.

use thiserror::Error;

use crate::document::DocumentError;

/// Errors that can occur while extracting a [`CatalogRecord`](super::CatalogRecord).
///
/// Only the identifier is mandatory; every other field falls back to an
/// empty value instead of producing an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Record-description element or its identifier attribute is missing
    #[error("{what} not found\n  Suggestion: Check that the input is a catalog RDF document")]
    NotFound {
        /// What was being looked up
        what: String,
    },

    /// Identifier does not parse as a non-negative integer
    #[error("invalid record identifier '{value}': {reason}")]
    Format {
        /// Raw attribute value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Input is not well-formed XML
    #[error("malformed catalog document: {0}")]
    Document(#[from] DocumentError),
}

impl ExtractError {
    /// Creates a `NotFound` error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Creates a `Format` error for an identifier value.
    #[must_use]
    pub fn format(value: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
