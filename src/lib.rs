//! Cataloger Core Library
//!
//! This library turns Project Gutenberg RDF/XML catalog documents into
//! structured [`CatalogRecord`]s.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`document`] - Namespace-aware XML document tree
//! - [`extract`] - Metadata extraction for a single catalog document
//! - [`scan`] - Corpus discovery and bounded-concurrency batch extraction

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod extract;
pub mod scan;

// Re-export commonly used types
pub use document::{
    DocumentError, DocumentTree, Element, ExpandedName, QualifiedName, XmlDocument,
};
pub use extract::{CatalogRecord, ExtractError, SourceFile, extract_record};
pub use scan::{
    CorpusScanner, DEFAULT_CONCURRENCY, DEFAULT_EXTENSION, RecordSink, ScanError, ScanFailure,
    ScanReport, ScanStats, discover_documents, extract_file,
};
