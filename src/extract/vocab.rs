//! Project Gutenberg catalog vocabulary.

use crate::document::ExpandedName;

/// RDF syntax namespace.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Gutenberg catalog terms.
pub const PGTERMS_NS: &str = "http://www.gutenberg.org/2009/pgterms/";
/// Dublin Core terms.
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";

/// Record-description element, one per document.
pub const EBOOK: ExpandedName<'static> = ExpandedName::new(PGTERMS_NS, "ebook");
pub const AGENT: ExpandedName<'static> = ExpandedName::new(PGTERMS_NS, "agent");
pub const AGENT_NAME: ExpandedName<'static> = ExpandedName::new(PGTERMS_NS, "name");
pub const FILE: ExpandedName<'static> = ExpandedName::new(PGTERMS_NS, "file");

pub const TITLE: ExpandedName<'static> = ExpandedName::new(DCTERMS_NS, "title");
pub const HAS_FORMAT: ExpandedName<'static> = ExpandedName::new(DCTERMS_NS, "hasFormat");

pub const RDF_ABOUT: ExpandedName<'static> = ExpandedName::new(RDF_NS, "about");
pub const RDF_RESOURCE: ExpandedName<'static> = ExpandedName::new(RDF_NS, "resource");
pub const RDF_VALUE: ExpandedName<'static> = ExpandedName::new(RDF_NS, "value");

/// Path prefix in front of the numeric id in `rdf:about="ebooks/<id>"`.
pub const EBOOK_ID_PREFIX: &str = "ebooks/";

/// `rdf:resource` suffix of Library of Congress Subject Headings links.
pub const LCSH_SUFFIX: &str = "/LCSH";
/// `rdf:resource` suffix of Library of Congress Classification links.
pub const LCC_SUFFIX: &str = "/LCC";
