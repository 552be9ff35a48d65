//! Namespace-resolved element and attribute names.

use std::fmt;

/// A name as it appears in the parsed tree, with its prefix resolved to a namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Namespace URI, `None` when the name is not in any namespace
    pub namespace: Option<String>,
    /// Local part of the name (no prefix)
    pub local: String,
}

impl QualifiedName {
    /// Creates a new qualified name.
    #[must_use]
    pub fn new(namespace: Option<String>, local: impl Into<String>) -> Self {
        Self {
            namespace,
            local: local.into(),
        }
    }

    /// Returns true when this name equals the expanded name `query`.
    #[must_use]
    pub fn matches(&self, query: ExpandedName<'_>) -> bool {
        self.local == query.local && self.namespace.as_deref().unwrap_or("") == query.namespace
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{namespace}}}{}", self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// Borrowed `{namespace}local` pair used to query a tree.
///
/// An empty namespace matches names that are not in any namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpandedName<'a> {
    /// Namespace URI (empty for no namespace)
    pub namespace: &'a str,
    /// Local part of the name
    pub local: &'a str,
}

impl<'a> ExpandedName<'a> {
    /// Creates an expanded name; usable in `const` vocabulary tables.
    #[must_use]
    pub const fn new(namespace: &'a str, local: &'a str) -> Self {
        Self { namespace, local }
    }
}

impl fmt::Display for ExpandedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        }
    }
}
