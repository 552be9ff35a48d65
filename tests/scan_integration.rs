//! Integration tests for corpus discovery and batch extraction.

use std::fs;
use std::path::Path;

use cataloger_core::{
    CatalogRecord, CorpusScanner, DEFAULT_EXTENSION, RecordSink, ScanError, ScanFailure,
    discover_documents,
};
use tempfile::TempDir;

const ART_OF_WAR: &str = include_str!("fixtures/pg132.rdf");

fn catalog_document(id: u64, title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:pgterms="http://www.gutenberg.org/2009/pgterms/"
         xmlns:dcterms="http://purl.org/dc/terms/">
  <pgterms:ebook rdf:about="ebooks/{id}">
    <dcterms:title>{title}</dcterms:title>
  </pgterms:ebook>
</rdf:RDF>"#
    )
}

/// Lays documents out the way the bulk archive does: `cache/epub/<id>/pg<id>.rdf`.
fn write_archive_layout(root: &Path, documents: &[(u64, String)]) {
    for (id, body) in documents {
        let dir = root.join("cache").join("epub").join(id.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("pg{id}.rdf")), body).unwrap();
    }
}

#[derive(Default)]
struct RecordingSink {
    records: Vec<CatalogRecord>,
    failures: Vec<ScanFailure>,
}

impl RecordSink for RecordingSink {
    fn accept(&mut self, record: CatalogRecord) -> Result<(), ScanError> {
        self.records.push(record);
        Ok(())
    }

    fn on_failure(&mut self, failure: &ScanFailure) {
        self.failures.push(failure.clone());
    }
}

/// Test discovery and extraction over an unpacked archive layout.
#[tokio::test]
async fn test_scan_archive_layout_extracts_every_document() {
    let temp = TempDir::new().unwrap();
    write_archive_layout(
        temp.path(),
        &[
            (132, ART_OF_WAR.to_string()),
            (11, catalog_document(11, "Alice's Adventures in Wonderland")),
            (1342, catalog_document(1342, "Pride and Prejudice")),
        ],
    );
    fs::write(temp.path().join("README.txt"), "not a catalog document").unwrap();

    let paths = discover_documents(temp.path(), DEFAULT_EXTENSION).unwrap();
    assert_eq!(paths.len(), 3);

    let scanner = CorpusScanner::new(4).unwrap();
    let mut records: Vec<CatalogRecord> = Vec::new();
    let report = scanner.scan(&paths, &mut records).await.unwrap();

    assert_eq!(report.stats.extracted(), 3);
    assert_eq!(report.stats.failed(), 0);
    assert!(report.failures.is_empty());

    // Discovery sorts paths lexically: 11 < 132 < 1342.
    let ids: Vec<u64> = records.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![11, 132, 1342]);
    assert_eq!(records[1].title, "The Art of War");
}

/// Test that bad documents are reported while the rest still come through.
#[tokio::test]
async fn test_scan_reports_failures_and_continues() {
    let temp = TempDir::new().unwrap();
    write_archive_layout(
        temp.path(),
        &[
            (1, catalog_document(1, "First")),
            (2, "<rdf:RDF".to_string()),
            (3, catalog_document(3, "Third")),
        ],
    );

    let paths = discover_documents(temp.path(), DEFAULT_EXTENSION).unwrap();
    let scanner = CorpusScanner::new(2).unwrap();
    let mut sink = RecordingSink::default();
    let report = scanner.scan(&paths, &mut sink).await.unwrap();

    assert_eq!(report.stats.extracted(), 2);
    assert_eq!(report.stats.failed(), 1);
    assert_eq!(report.stats.total(), 3);

    let titles: Vec<&str> = sink.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Third"]);

    assert_eq!(sink.failures.len(), 1);
    assert_eq!(sink.failures, report.failures);
    assert!(sink.failures[0].path.ends_with("pg2.rdf"));
}

/// Test that fail-fast stops at the first bad document.
#[tokio::test]
async fn test_scan_fail_fast_returns_document_error() {
    let temp = TempDir::new().unwrap();
    write_archive_layout(
        temp.path(),
        &[
            (1, catalog_document(1, "First")),
            (
                2,
                catalog_document(2, "Bad").replace("ebooks/2", "ebooks/two"),
            ),
        ],
    );

    let paths = discover_documents(temp.path(), DEFAULT_EXTENSION).unwrap();
    let scanner = CorpusScanner::new(1).unwrap().with_fail_fast(true);
    let mut records: Vec<CatalogRecord> = Vec::new();
    let err = scanner.scan(&paths, &mut records).await.unwrap_err();

    assert!(matches!(err, ScanError::Document { .. }), "got {err:?}");
    assert!(err.path().is_some_and(|path| path.ends_with("pg2.rdf")));
    assert_eq!(records.len(), 1);
}

/// Test that an empty directory scans to an empty report.
#[tokio::test]
async fn test_scan_empty_directory_is_empty_report() {
    let temp = TempDir::new().unwrap();

    let paths = discover_documents(temp.path(), DEFAULT_EXTENSION).unwrap();
    assert!(paths.is_empty());

    let scanner = CorpusScanner::new(8).unwrap();
    let mut records: Vec<CatalogRecord> = Vec::new();
    let report = scanner.scan(&paths, &mut records).await.unwrap();

    assert_eq!(report.stats.total(), 0);
    assert!(records.is_empty());
}

/// Test that discovery of a missing root is a path error.
#[test]
fn test_discover_missing_root_is_path_not_found() {
    let temp = TempDir::new().unwrap();
    let err = discover_documents(&temp.path().join("missing"), DEFAULT_EXTENSION).unwrap_err();
    assert!(matches!(err, ScanError::PathNotFound(_)), "got {err:?}");
}
