//! Arena-backed XML document used for in-place body rewriting.
//!
//! Nodes live in a single `Vec` owned by [`Document`] and are addressed by
//! stable [`NodeId`] indices. Structural changes go through three primitives
//! ([`Document::insert_before`], [`Document::remove_child`],
//! [`Document::reparent_children`]) that keep parent and child links in sync.
//! Detached nodes stay in the arena but are unreachable from the root, so they
//! are never serialized.
//!
//! Text, comments, and attribute values are kept in their raw (still escaped)
//! source form so an untouched subtree serializes back to the bytes it was
//! parsed from.

mod parser;
mod serializer;

use contentlink_shared::{ContentLinkError, Result};
use quick_xml::escape::{escape, unescape};

// ---------------------------------------------------------------------------
// Node types
// ---------------------------------------------------------------------------

/// Stable index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A single attribute with its value in raw (escaped) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub raw_value: String,
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// Written as `<name/>` when it has no children.
    pub self_closing: bool,
}

/// What a node holds. Character data is stored raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document node; always at index 0.
    Document,
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    DocType(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// An XML document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parse a well-formed XML body (e.g. `<body>…</body>`).
    ///
    /// Fails with a parse error on malformed markup, a missing root element,
    /// more than one root element, or character data outside the root.
    pub fn parse(text: &str) -> Result<Self> {
        parser::parse(text)
    }

    /// Serialize the tree back to text. The XML declaration is never written.
    pub fn serialize(&self) -> Result<String> {
        serializer::serialize(self)
    }

    fn empty() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The single top-level element.
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .iter()
            .copied()
            .find(|&id| self.element(id).is_some())
    }

    /// Number of nodes reachable from the document node (including it).
    #[cfg(test)]
    fn attached_len(&self) -> usize {
        self.descendants(self.root()).count()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id).kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Pre-order traversal of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// All elements named `name`, in document order.
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(self.root())
            .filter(move |&id| self.element(id).is_some_and(|el| el.name == name))
    }

    /// Unescaped value of attribute `name` on element `id`.
    ///
    /// Values with malformed entity references are returned raw.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        let attr = self
            .element(id)?
            .attributes
            .iter()
            .find(|attr| attr.name == name)?;
        Some(match unescape(&attr.raw_value) {
            Ok(value) => value.into_owned(),
            Err(_) => attr.raw_value.clone(),
        })
    }

    /// Concatenated, unescaped text content below `id`.
    #[cfg(test)]
    fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| match self.kind(n) {
                NodeKind::Text(raw) => Some(
                    unescape(raw)
                        .map(|t| t.into_owned())
                        .unwrap_or_else(|_| raw.clone()),
                ),
                NodeKind::CData(raw) => Some(raw.clone()),
                _ => None,
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Create a detached element with the given (unescaped) attributes.
    pub fn create_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<NodeId> {
        if !is_valid_name(name) {
            return Err(ContentLinkError::validation(format!(
                "invalid element name {name:?}"
            )));
        }
        let mut attrs = Vec::with_capacity(attributes.len());
        for (attr_name, value) in attributes {
            if !is_valid_name(attr_name) {
                return Err(ContentLinkError::validation(format!(
                    "invalid attribute name {attr_name:?}"
                )));
            }
            attrs.push(Attribute {
                name: (*attr_name).to_string(),
                raw_value: escape(*value).into_owned(),
            });
        }
        Ok(self.push(NodeKind::Element(Element {
            name: name.to_string(),
            attributes: attrs,
            self_closing: true,
        })))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append an already-detached node as the last child of `parent`.
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    // -----------------------------------------------------------------------
    // Mutation primitives
    // -----------------------------------------------------------------------

    /// Insert detached node `new` into `parent` immediately before `reference`.
    pub fn insert_before(&mut self, parent: NodeId, new: NodeId, reference: NodeId) -> Result<()> {
        self.check_id(parent)?;
        self.check_id(new)?;
        if self.node(new).parent.is_some() {
            return Err(ContentLinkError::validation(format!(
                "node {} is already attached",
                new.0
            )));
        }
        if self.is_ancestor_or_self(new, parent) {
            return Err(ContentLinkError::validation(
                "cannot insert a node into its own subtree",
            ));
        }
        if !self.accepts_children(parent) {
            return Err(ContentLinkError::validation(format!(
                "node {} cannot have children",
                parent.0
            )));
        }
        let position = self.child_position(parent, reference)?;
        self.node_mut(new).parent = Some(parent);
        self.node_mut(parent).children.insert(position, new);
        Ok(())
    }

    /// Detach `child` from `parent`. The node keeps its own children.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let position = self.child_position(parent, child)?;
        self.node_mut(parent).children.remove(position);
        self.node_mut(child).parent = None;
        Ok(())
    }

    /// Move every child of `from` to the end of `to`, keeping their order.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.check_id(from)?;
        self.check_id(to)?;
        if from == to {
            return Ok(());
        }
        if self.is_ancestor_or_self(from, to) {
            return Err(ContentLinkError::validation(
                "cannot move children into their own subtree",
            ));
        }
        if !self.accepts_children(to) {
            return Err(ContentLinkError::validation(format!(
                "node {} cannot have children",
                to.0
            )));
        }
        let moved = std::mem::take(&mut self.node_mut(from).children);
        for &child in &moved {
            self.node_mut(child).parent = Some(to);
        }
        self.node_mut(to).children.extend(moved);
        Ok(())
    }

    /// Replace `target` with the detached element `replacement`, moving the
    /// target's children (in order) under the replacement.
    pub fn replace_element(&mut self, target: NodeId, replacement: NodeId) -> Result<()> {
        let parent = self.parent(target).ok_or_else(|| {
            ContentLinkError::validation(format!("node {} is not attached", target.0))
        })?;
        self.reparent_children(target, replacement)?;
        self.insert_before(parent, replacement, target)?;
        self.remove_child(parent, target)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn check_id(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(ContentLinkError::validation(format!(
                "node {} does not exist",
                id.0
            )))
        }
    }

    fn accepts_children(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Document | NodeKind::Element(_))
    }

    fn child_position(&self, parent: NodeId, child: NodeId) -> Result<usize> {
        self.check_id(parent)?;
        self.check_id(child)?;
        self.node(parent)
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or_else(|| {
                ContentLinkError::validation(format!(
                    "node {} is not a child of node {}",
                    child.0, parent.0
                ))
            })
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.node(id).parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}
