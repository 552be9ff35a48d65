//! Typed, namespace-aware XML document tree.
//!
//! Catalog documents are parsed into an owned tree of [`Element`]s whose
//! names carry resolved namespace URIs, so lookups never depend on which
//! prefix a document happens to bind.
//!
//! Lookups go through the [`DocumentTree`] capability set, which is
//! implemented both for whole documents and for individual elements (to
//! scope a query to a subtree).
//!
//! # Example
//!
//! ```
//! use cataloger_core::document::{DocumentTree, ExpandedName, XmlDocument};
//!
//! let doc = XmlDocument::parse(
//!     r#"<r xmlns:d="urn:d"><d:item d:ref="a/X"/><d:item d:ref="b/Y">y</d:item></r>"#,
//! ).unwrap();
//!
//! let items = doc.find_elements(ExpandedName::new("urn:d", "item"));
//! assert_eq!(items.len(), 2);
//!
//! let ys = doc.find_elements_with_attribute_suffix(ExpandedName::new("urn:d", "ref"), "/Y");
//! assert_eq!(doc.text(ys[0]), "y");
//! ```

mod error;
mod name;
mod tree;

pub use error::DocumentError;
pub use name::{ExpandedName, QualifiedName};
pub use tree::{Attribute, Descendants, Element, Node, XmlDocument};

/// Query capabilities over a parsed document or subtree.
///
/// All element-returning operations yield results in document order and
/// search the receiver itself as well as its descendants.
pub trait DocumentTree {
    /// Top of the searchable tree.
    fn scope(&self) -> &Element;

    /// All elements named `name`.
    fn find_elements(&self, name: ExpandedName<'_>) -> Vec<&Element> {
        self.scope()
            .descendants()
            .filter(|element| element.name().matches(name))
            .collect()
    }

    /// First element named `name`, if any.
    fn find_first(&self, name: ExpandedName<'_>) -> Option<&Element> {
        self.scope()
            .descendants()
            .find(|element| element.name().matches(name))
    }

    /// All elements carrying attribute `attribute` whose value ends with `suffix`.
    fn find_elements_with_attribute_suffix(
        &self,
        attribute: ExpandedName<'_>,
        suffix: &str,
    ) -> Vec<&Element> {
        self.scope()
            .descendants()
            .filter(|element| {
                element
                    .attribute(attribute)
                    .is_some_and(|value| value.ends_with(suffix))
            })
            .collect()
    }

    /// Element directly containing `child`, compared by identity.
    fn parent_of<'a>(&'a self, child: &Element) -> Option<&'a Element> {
        self.scope().descendants().find(|candidate| {
            candidate
                .child_elements()
                .any(|element| std::ptr::eq(element, child))
        })
    }

    /// Value of `element`'s attribute `name`.
    fn attribute<'e>(&self, element: &'e Element, name: ExpandedName<'_>) -> Option<&'e str> {
        element.attribute(name)
    }

    /// Concatenated descendant text of `element`.
    fn text(&self, element: &Element) -> String {
        element.text()
    }
}

impl DocumentTree for XmlDocument {
    fn scope(&self) -> &Element {
        self.root()
    }
}

impl DocumentTree for Element {
    fn scope(&self) -> &Element {
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const NS: &str = "urn:t";
    const ITEM: ExpandedName<'static> = ExpandedName::new(NS, "item");
    const REF: ExpandedName<'static> = ExpandedName::new(NS, "ref");

    fn sample() -> XmlDocument {
        XmlDocument::parse(
            r#"<t:root xmlns:t="urn:t">
                 <t:group><t:item t:ref="x/LCSH">one</t:item><t:item>two</t:item></t:group>
                 <t:item t:ref="y/LCC">three</t:item>
               </t:root>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_elements_returns_document_order() {
        let doc = sample();
        let texts: Vec<_> = doc
            .find_elements(ITEM)
            .into_iter()
            .map(Element::text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_find_elements_scoped_to_subtree() {
        let doc = sample();
        let group = doc.find_first(ExpandedName::new(NS, "group")).unwrap();
        assert_eq!(group.find_elements(ITEM).len(), 2);
    }

    #[test]
    fn test_find_first_missing_returns_none() {
        let doc = sample();
        assert!(doc.find_first(ExpandedName::new(NS, "absent")).is_none());
    }

    #[test]
    fn test_find_elements_with_attribute_suffix_matches_only_suffix() {
        let doc = sample();
        let lcsh = doc.find_elements_with_attribute_suffix(REF, "/LCSH");
        assert_eq!(lcsh.len(), 1);
        assert_eq!(doc.text(lcsh[0]), "one");
        assert!(doc.find_elements_with_attribute_suffix(REF, "/DDC").is_empty());
    }

    #[test]
    fn test_parent_of_finds_direct_parent() {
        let doc = sample();
        let first = doc.find_first(ITEM).unwrap();
        let parent = doc.parent_of(first).unwrap();
        assert_eq!(parent.name().local, "group");
        assert!(doc.parent_of(doc.root()).is_none());
    }

    #[test]
    fn test_attribute_reads_namespaced_value() {
        let doc = sample();
        let first = doc.find_first(ITEM).unwrap();
        assert_eq!(doc.attribute(first, REF), Some("x/LCSH"));
        assert_eq!(doc.attribute(first, ExpandedName::new("", "ref")), None);
    }
}
