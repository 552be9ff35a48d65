//! Structured catalog record produced by the extractor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A downloadable rendition of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Resource locator of the file
    pub source: String,
    /// MIME-type-like format label (e.g. `text/plain; charset=utf-8`)
    pub format: String,
}

impl SourceFile {
    /// Creates a new source entry.
    #[must_use]
    pub fn new(source: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            format: format.into(),
        }
    }
}

/// One catalog entry extracted from an RDF/XML document.
///
/// Every field except `id` degrades to empty when the document omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Numeric ebook identifier
    pub id: u64,
    /// Title, empty when absent
    pub title: String,
    /// Contributor names in document order
    pub authors: Vec<String>,
    /// LCSH subject headings in document order
    pub subjects: Vec<String>,
    /// LCC classification code, empty when absent
    pub lcc: String,
    /// Available files with their formats
    pub sources: Vec<SourceFile>,
}

impl fmt::Display for CatalogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.title.is_empty() {
            "(untitled)"
        } else {
            self.title.as_str()
        };
        write!(f, "#{} {}", self.id, title)?;
        if !self.authors.is_empty() {
            write!(f, " by {}", self.authors.join("; "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_record_serializes_with_flat_field_names() {
        let record = CatalogRecord {
            id: 132,
            title: "The Art of War".to_string(),
            authors: vec!["Sunzi".to_string()],
            subjects: vec![],
            lcc: "U".to_string(),
            sources: vec![SourceFile::new("R1", "text/plain")],
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 132);
        assert_eq!(json["lcc"], "U");
        assert_eq!(json["sources"][0]["source"], "R1");
        assert_eq!(json["sources"][0]["format"], "text/plain");
        assert!(json["subjects"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_catalog_record_display_with_authors() {
        let record = CatalogRecord {
            id: 7,
            title: "T".to_string(),
            authors: vec!["A".to_string(), "B".to_string()],
            ..CatalogRecord::default()
        };
        assert_eq!(record.to_string(), "#7 T by A; B");
    }

    #[test]
    fn test_catalog_record_display_untitled() {
        let record = CatalogRecord {
            id: 9,
            ..CatalogRecord::default()
        };
        assert_eq!(record.to_string(), "#9 (untitled)");
    }
}
