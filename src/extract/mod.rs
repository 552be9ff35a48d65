//! Metadata extraction for Project Gutenberg RDF/XML catalog documents.
//!
//! [`extract_record`] turns the full text of one catalog document into a
//! [`CatalogRecord`]. The identifier is the only mandatory field: a missing
//! record-description element or `rdf:about` attribute is
//! [`ExtractError::NotFound`], a non-numeric identifier is
//! [`ExtractError::Format`]. Every other lookup is soft and yields an empty
//! string or an empty list when the document omits it.
//!
//! # Example
//!
//! ```
//! use cataloger_core::extract::extract_record;
//!
//! let rdf = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!                       xmlns:pgterms="http://www.gutenberg.org/2009/pgterms/"
//!                       xmlns:dcterms="http://purl.org/dc/terms/">
//!   <pgterms:ebook rdf:about="ebooks/132">
//!     <dcterms:title>The Art of War</dcterms:title>
//!   </pgterms:ebook>
//! </rdf:RDF>"#;
//!
//! let record = extract_record(rdf).unwrap();
//! assert_eq!(record.id, 132);
//! assert_eq!(record.title, "The Art of War");
//! assert!(record.authors.is_empty());
//! ```

mod error;
mod record;
pub mod vocab;

pub use error::ExtractError;
pub use record::{CatalogRecord, SourceFile};

use tracing::debug;

use crate::document::{DocumentTree, Element, XmlDocument};

/// Parses one RDF/XML catalog document and extracts its record.
///
/// # Errors
///
/// - [`ExtractError::Document`] when the input is not well-formed XML
/// - [`ExtractError::NotFound`] when `pgterms:ebook` or its `rdf:about` is missing
/// - [`ExtractError::Format`] when the identifier is not a non-negative integer
#[tracing::instrument(skip(document), fields(input_len = document.len()))]
pub fn extract_record(document: &str) -> Result<CatalogRecord, ExtractError> {
    let tree = XmlDocument::parse(document)?;
    extract_from_tree(&tree)
}

/// Extracts a record from an already parsed tree.
///
/// # Errors
///
/// Same as [`extract_record`], minus [`ExtractError::Document`].
pub fn extract_from_tree<T: DocumentTree>(tree: &T) -> Result<CatalogRecord, ExtractError> {
    let id = extract_id(tree)?;

    let title = tree
        .find_first(vocab::TITLE)
        .map(|title| tree.text(title))
        .unwrap_or_default();

    let authors = extract_authors(tree);
    let subjects = classified_values(tree, vocab::LCSH_SUFFIX);
    let lcc = classified_values(tree, vocab::LCC_SUFFIX)
        .into_iter()
        .next()
        .unwrap_or_default();
    let sources = extract_sources(tree);

    debug!(
        id,
        authors = authors.len(),
        subjects = subjects.len(),
        sources = sources.len(),
        has_title = !title.is_empty(),
        "Extracted catalog record"
    );

    Ok(CatalogRecord {
        id,
        title,
        authors,
        subjects,
        lcc,
        sources,
    })
}

fn extract_id<T: DocumentTree>(tree: &T) -> Result<u64, ExtractError> {
    let ebook = tree
        .find_first(vocab::EBOOK)
        .ok_or_else(|| ExtractError::not_found("record-description element <pgterms:ebook>"))?;
    let about = tree
        .attribute(ebook, vocab::RDF_ABOUT)
        .ok_or_else(|| ExtractError::not_found("rdf:about attribute on <pgterms:ebook>"))?;
    parse_identifier(about)
}

/// Parses an `rdf:about` value such as `ebooks/132` into its numeric id.
///
/// The `ebooks/` prefix is optional; surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`ExtractError::Format`] when the remainder is empty, negative,
/// non-numeric or does not fit in `u64`.
pub fn parse_identifier(about: &str) -> Result<u64, ExtractError> {
    let remainder = about
        .strip_prefix(vocab::EBOOK_ID_PREFIX)
        .unwrap_or(about)
        .trim();
    if remainder.is_empty() {
        return Err(ExtractError::format(about, "identifier is empty"));
    }
    if !remainder.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExtractError::format(
            about,
            "identifier is not a non-negative integer",
        ));
    }
    remainder
        .parse::<u64>()
        .map_err(|err| ExtractError::format(about, err.to_string()))
}

fn extract_authors<T: DocumentTree>(tree: &T) -> Vec<String> {
    let mut seen: Vec<&Element> = Vec::new();
    for agent in tree.find_elements(vocab::AGENT) {
        for name in agent.find_elements(vocab::AGENT_NAME) {
            if !seen.iter().any(|known| std::ptr::eq(*known, name)) {
                seen.push(name);
            }
        }
    }
    seen.into_iter().map(|name| tree.text(name)).collect()
}

/// Texts of `rdf:value` elements that sit next to a link into the vocabulary
/// whose `rdf:resource` ends with `scheme_suffix`.
fn classified_values<T: DocumentTree>(tree: &T, scheme_suffix: &str) -> Vec<String> {
    let mut parents: Vec<&Element> = Vec::new();
    for link in tree.find_elements_with_attribute_suffix(vocab::RDF_RESOURCE, scheme_suffix) {
        let Some(parent) = tree.parent_of(link) else {
            continue;
        };
        if !parents.iter().any(|known| std::ptr::eq(*known, parent)) {
            parents.push(parent);
        }
    }

    parents
        .into_iter()
        .flat_map(|parent| parent.find_elements(vocab::RDF_VALUE))
        .map(|value| tree.text(value))
        .collect()
}

fn extract_sources<T: DocumentTree>(tree: &T) -> Vec<SourceFile> {
    tree.find_elements(vocab::HAS_FORMAT)
        .into_iter()
        .map(|format| {
            let source = format
                .find_first(vocab::FILE)
                .and_then(|file| tree.attribute(file, vocab::RDF_ABOUT))
                .unwrap_or_default()
                .to_string();
            let label = format
                .find_first(vocab::RDF_VALUE)
                .map(|value| tree.text(value))
                .unwrap_or_default();
            SourceFile::new(source, label)
        })
        .collect()
}
