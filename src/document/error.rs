//! Error types for XML document parsing.

use thiserror::Error;

/// Errors that can occur while building an [`XmlDocument`](super::XmlDocument).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Input is not well-formed (namespace-aware) XML
    #[error("malformed XML at byte {position}: {reason}")]
    Malformed {
        /// Byte offset into the input where the problem was detected
        position: usize,
        /// What went wrong
        reason: String,
    },
}

impl DocumentError {
    /// Creates a `Malformed` error at the given byte offset.
    #[must_use]
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            reason: reason.into(),
        }
    }

    /// Creates a `Malformed` error for a prefix without an in-scope `xmlns` declaration.
    #[must_use]
    pub fn unbound_prefix(position: usize, prefix: &[u8]) -> Self {
        Self::malformed(
            position,
            format!(
                "unbound namespace prefix '{}'",
                String::from_utf8_lossy(prefix)
            ),
        )
    }

    /// Byte offset where parsing stopped.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::Malformed { position, .. } => *position,
        }
    }
}
