//! Owned element tree built from a namespace-aware `quick-xml` event stream.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use tracing::trace;

use super::error::DocumentError;
use super::name::{ExpandedName, QualifiedName};

/// Namespace permanently bound to the `xml` prefix.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data (entities unescaped, CDATA included verbatim)
    Text(String),
}

/// A single attribute with its namespace-resolved name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Resolved attribute name
    pub name: QualifiedName,
    /// Unescaped attribute value
    pub value: String,
}

/// An element and everything nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: QualifiedName,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element with the given name.
    #[must_use]
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Resolved element name.
    #[must_use]
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Attributes in source order, `xmlns` declarations excluded.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the attribute named `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: ExpandedName<'_>) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name.matches(name))
            .map(|attribute| attribute.value.as_str())
    }

    /// Child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in document order (text nodes skipped).
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Pre-order traversal starting with this element.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Concatenated text of every descendant text node.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    pub(crate) fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub(crate) fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for node in &element.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out),
        }
    }
}

/// Iterator returned by [`Element::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.child_elements().rev());
        Some(element)
    }
}

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    /// Parses `input` into an owned element tree.
    ///
    /// Element and attribute prefixes are resolved through the in-scope
    /// `xmlns` declarations. Comments, processing instructions and the
    /// doctype are dropped; text outside the root element is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Malformed`] for syntax errors, mismatched or
    /// unclosed tags, unbound prefixes, more than one root element, or input
    /// with no root element at all.
    ///
    /// # Example
    ///
    /// ```
    /// use cataloger_core::document::{ExpandedName, XmlDocument};
    ///
    /// let doc = XmlDocument::parse(r#"<a:x xmlns:a="urn:a" a:k="v">hi</a:x>"#).unwrap();
    /// assert_eq!(doc.root().attribute(ExpandedName::new("urn:a", "k")), Some("v"));
    /// assert_eq!(doc.root().text(), "hi");
    /// ```
    #[tracing::instrument(skip(input), fields(input_len = input.len()))]
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        let mut reader = NsReader::from_str(input);
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position();
            let (namespace, event) = match reader.read_resolved_event() {
                Ok((resolved, event)) => (owned_namespace(resolved), event),
                Err(err) => {
                    return Err(DocumentError::malformed(
                        reader.buffer_position(),
                        err.to_string(),
                    ));
                }
            };

            match event {
                Event::Start(start) => {
                    let element = build_element(&reader, namespace, &start, position)?;
                    open.push(element);
                }
                Event::Empty(start) => {
                    let element = build_element(&reader, namespace, &start, position)?;
                    attach(&mut open, &mut root, element, position)?;
                }
                Event::End(_) => {
                    let Some(element) = open.pop() else {
                        return Err(DocumentError::malformed(position, "unexpected end tag"));
                    };
                    attach(&mut open, &mut root, element, position)?;
                }
                Event::Text(text) => {
                    if let Some(parent) = open.last_mut() {
                        let value = text
                            .unescape()
                            .map_err(|err| DocumentError::malformed(position, err.to_string()))?;
                        parent.push_child(Node::Text(value.into_owned()));
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = open.last_mut() {
                        parent.push_child(Node::Text(String::from_utf8_lossy(&data).into_owned()));
                    }
                }
                Event::Eof => break,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(DocumentError::malformed(
                input.len(),
                format!("unclosed element <{}>", unclosed.name().local),
            ));
        }

        let root =
            root.ok_or_else(|| DocumentError::malformed(input.len(), "no root element"))?;
        trace!(root = %root.name(), "Parsed XML document");
        Ok(Self { root })
    }

    /// The document (root) element.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }
}

fn owned_namespace(resolved: ResolveResult<'_>) -> Result<Option<String>, Vec<u8>> {
    match resolved {
        ResolveResult::Bound(namespace) => {
            Ok(Some(String::from_utf8_lossy(namespace.as_ref()).into_owned()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(prefix),
    }
}

fn build_element(
    reader: &NsReader<&[u8]>,
    namespace: Result<Option<String>, Vec<u8>>,
    start: &BytesStart<'_>,
    position: usize,
) -> Result<Element, DocumentError> {
    let namespace =
        namespace.map_err(|prefix| DocumentError::unbound_prefix(position, &prefix))?;
    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut element = Element::new(QualifiedName::new(namespace, local));

    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|err| DocumentError::malformed(position, err.to_string()))?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }

        let (resolved, local) = reader.resolve_attribute(attribute.key);
        let namespace = if attribute
            .key
            .prefix()
            .is_some_and(|prefix| prefix.as_ref() == b"xml")
        {
            Some(XML_NAMESPACE.to_string())
        } else {
            owned_namespace(resolved)
                .map_err(|prefix| DocumentError::unbound_prefix(position, &prefix))?
        };
        let value = attribute
            .unescape_value()
            .map_err(|err| DocumentError::malformed(position, err.to_string()))?;

        element.push_attribute(Attribute {
            name: QualifiedName::new(
                namespace,
                String::from_utf8_lossy(local.as_ref()).into_owned(),
            ),
            value: value.into_owned(),
        });
    }

    Ok(element)
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: usize,
) -> Result<(), DocumentError> {
    if let Some(parent) = open.last_mut() {
        parent.push_child(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(DocumentError::malformed(
            position,
            format!("second root element <{}>", element.name().local),
        ));
    }
    *root = Some(element);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const NS_A: &str = "urn:a";
    const NS_B: &str = "urn:b";

    fn parse(input: &str) -> XmlDocument {
        XmlDocument::parse(input).unwrap()
    }

    #[test]
    fn test_parse_resolves_prefixes_to_namespaces() {
        let doc = parse(r#"<a:root xmlns:a="urn:a" xmlns:b="urn:b"><b:child/></a:root>"#);
        assert!(doc.root().name().matches(ExpandedName::new(NS_A, "root")));
        let child = doc.root().child_elements().next().unwrap();
        assert!(child.name().matches(ExpandedName::new(NS_B, "child")));
    }

    #[test]
    fn test_parse_default_namespace_applies_to_elements_not_attributes() {
        let doc = parse(r#"<root xmlns="urn:a" k="v"/>"#);
        assert!(doc.root().name().matches(ExpandedName::new(NS_A, "root")));
        assert_eq!(doc.root().attribute(ExpandedName::new("", "k")), Some("v"));
        assert_eq!(doc.root().attribute(ExpandedName::new(NS_A, "k")), None);
    }

    #[test]
    fn test_parse_skips_namespace_declarations_in_attributes() {
        let doc = parse(r#"<a:root xmlns:a="urn:a" a:k="v"/>"#);
        assert_eq!(doc.root().attributes().len(), 1);
    }

    #[test]
    fn test_parse_unescapes_text_and_attributes() {
        let doc = parse(r#"<root k="a &amp; b">x &lt; y</root>"#);
        assert_eq!(doc.root().attribute(ExpandedName::new("", "k")), Some("a & b"));
        assert_eq!(doc.root().text(), "x < y");
    }

    #[test]
    fn test_parse_keeps_cdata_as_text() {
        let doc = parse("<root><![CDATA[<raw>]]></root>");
        assert_eq!(doc.root().text(), "<raw>");
    }

    #[test]
    fn test_text_concatenates_descendants_in_order() {
        let doc = parse("<root>a<x>b<y>c</y></x>d</root>");
        assert_eq!(doc.root().text(), "abcd");
    }

    #[test]
    fn test_descendants_is_preorder_including_self() {
        let doc = parse("<r><a><b/></a><c/></r>");
        let names: Vec<_> = doc
            .root()
            .descendants()
            .map(|e| e.name().local.as_str())
            .collect();
        assert_eq!(names, vec!["r", "a", "b", "c"]);
    }

    #[test]
    fn test_parse_ignores_prolog_comments_and_outer_whitespace() {
        let doc = parse("<?xml version=\"1.0\"?>\n<!-- hi -->\n<root/>\n");
        assert_eq!(doc.root().name().local, "root");
    }

    #[test]
    fn test_parse_rejects_mismatched_end_tag() {
        let err = XmlDocument::parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, DocumentError::Malformed { .. }));
    }

    #[test]
    fn test_parse_rejects_unclosed_element() {
        let err = XmlDocument::parse("<a><b></b>").unwrap_err();
        assert!(err.to_string().contains("unclosed element <a>"));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        let err = XmlDocument::parse("   ").unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }

    #[test]
    fn test_parse_rejects_second_root() {
        let err = XmlDocument::parse("<a/><b/>").unwrap_err();
        assert!(err.to_string().contains("second root"));
    }

    #[test]
    fn test_parse_binds_reserved_xml_prefix() {
        let doc = parse(r#"<root xml:base="http://www.gutenberg.org/" xml:lang="en"/>"#);
        assert_eq!(
            doc.root().attribute(ExpandedName::new(XML_NAMESPACE, "base")),
            Some("http://www.gutenberg.org/")
        );
        assert_eq!(
            doc.root().attribute(ExpandedName::new(XML_NAMESPACE, "lang")),
            Some("en")
        );
    }

    #[test]
    fn test_parse_rejects_unbound_prefix() {
        let err = XmlDocument::parse("<x:a/>").unwrap_err();
        assert!(err.to_string().contains("unbound namespace prefix 'x'"));
    }
}
