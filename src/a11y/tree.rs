//! Element Tree - Minimal markup representation for attribute normalization
//!
//! The normalizer is a pure function over a tree description: the host hands
//! in whatever element tree it owns (or a mirror of it) and gets back a list
//! of attribute edits to apply. [`Element`] is that description, [`AttrEdit`]
//! the output vocabulary, and [`apply`] a convenience for hosts that keep
//! their tree in this representation.

use std::collections::BTreeMap;

/// One element in a markup subtree: a tag, an attribute map, and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute. An empty value is valid (boolean attributes).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    /// Resolve a child-index path from this element. An empty path is the
    /// element itself.
    pub fn node_at(&self, path: &[usize]) -> Option<&Element> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut node = self;
        for &index in path {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }

    /// Paths of all strict descendants with the given tag, case-insensitive,
    /// in document order.
    pub fn descendant_paths_by_tag(&self, tag: &str) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        collect_by_tag(self, tag, &mut prefix, &mut paths);
        paths
    }
}

fn collect_by_tag(node: &Element, tag: &str, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    for (index, child) in node.children.iter().enumerate() {
        prefix.push(index);
        if child.tag.eq_ignore_ascii_case(tag) {
            out.push(prefix.clone());
        }
        collect_by_tag(child, tag, prefix, out);
        prefix.pop();
    }
}

/// One attribute assignment, addressed by a child-index path from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrEdit {
    Set {
        path: Vec<usize>,
        name: String,
        value: String,
    },
    Remove {
        path: Vec<usize>,
        name: String,
    },
}

impl AttrEdit {
    pub fn set(path: Vec<usize>, name: &str, value: &str) -> Self {
        Self::Set {
            path,
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn remove(path: Vec<usize>, name: &str) -> Self {
        Self::Remove {
            path,
            name: name.to_string(),
        }
    }
}

/// Apply edits to a tree in this representation. Edits whose path no longer
/// resolves (the tree mutated since planning) are skipped.
pub fn apply(root: &mut Element, edits: &[AttrEdit]) {
    for edit in edits {
        match edit {
            AttrEdit::Set { path, name, value } => {
                if let Some(node) = root.node_at_mut(path) {
                    node.set_attr(name.clone(), value.clone());
                }
            }
            AttrEdit::Remove { path, name } => {
                if let Some(node) = root.node_at_mut(path) {
                    node.remove_attr(name);
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
