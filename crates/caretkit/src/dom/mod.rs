//! # Document model
//!
//! ## Overview
//!
//! This module models the minimal slice of a host document that the editable
//! region logic observes: a node arena with parent links, child lists, and a
//! single document-level [Selection].
//!
//! An editable region is an element node carrying the editable-region marker
//! (the equivalent of a data attribute on the host element). The region's
//! children form the logical content sequence: text nodes contribute their
//! character count, and break nodes contribute one unit each. The region is
//! expected to stay flat, and [Dom::normalize] enforces that by stripping the
//! empty text nodes and stray child elements a host may seed.
//!
//! Text node offsets are counted in characters throughout.

use crate::util::{byte_of_char, char_len};

mod selection;

pub use self::selection::{Boundary, Range, Selection};

/// Handle to a node within a [Dom].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

/// The different kinds of nodes that can appear in a [Dom].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NodeKind {
    /// An element node.
    Element {
        /// Whether this element carries the editable-region marker.
        editable_region: bool,
    },

    /// A run of character data.
    Text(String),

    /// A single line-break marker.
    Break,
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document: a node arena plus the document-level selection.
#[derive(Debug, Default)]
pub struct Dom {
    nodes: Vec<NodeData>,
    selection: Selection,
}

impl Dom {
    /// Create an empty document.
    pub fn new() -> Self {
        Dom::default()
    }

    fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());

        self.nodes.push(NodeData { kind, parent: None, children: Vec::new() });

        return id;
    }

    /// Create an element node flagged as an editable region.
    pub fn create_region(&mut self) -> NodeId {
        self.create(NodeKind::Element { editable_region: true })
    }

    /// Create an element node without the editable-region marker.
    pub fn create_element(&mut self) -> NodeId {
        self.create(NodeKind::Element { editable_region: false })
    }

    /// Create a text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create(NodeKind::Text(text.into()))
    }

    /// Create a line-break node.
    pub fn create_break(&mut self) -> NodeId {
        self.create(NodeKind::Break)
    }

    /// The kind of a node.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Whether a node is a text node.
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Text(_))
    }

    /// Whether a node is a line-break node.
    pub fn is_break(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Break)
    }

    /// Whether a node is an element carrying the editable-region marker.
    pub fn is_editable_region(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { editable_region: true })
    }

    /// The parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The children of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The index of `child` within `parent`'s child list.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes[parent.0].children.iter().position(|c| *c == child)
    }

    /// The character data of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        if let NodeKind::Text(ref s) = self.nodes[id.0].kind {
            Some(s.as_str())
        } else {
            None
        }
    }

    /// Append `child` to the end of `parent`'s child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let idx = self.nodes[parent.0].children.len();

        self.insert_child(parent, idx, child);
    }

    /// Insert `child` into `parent`'s child list at `idx`, detaching it from
    /// any previous parent first.
    pub fn insert_child(&mut self, parent: NodeId, idx: usize, child: NodeId) {
        self.detach(child);

        let idx = idx.min(self.nodes[parent.0].children.len());

        self.nodes[parent.0].children.insert(idx, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Remove the child at `idx` from `parent`'s child list.
    pub fn remove_child(&mut self, parent: NodeId, idx: usize) -> NodeId {
        let child = self.nodes[parent.0].children.remove(idx);

        self.nodes[child.0].parent = None;

        return child;
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent {
            if let Some(idx) = self.child_index(parent, child) {
                self.nodes[parent.0].children.remove(idx);
            }

            self.nodes[child.0].parent = None;
        }
    }

    /// Walk parent links from `id` looking for an enclosing editable region.
    ///
    /// Terminates at the first node without a parent.
    pub fn find_editable_region(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = Some(id);

        while let Some(node) = cursor {
            if self.is_editable_region(node) {
                return Some(node);
            }

            cursor = self.nodes[node.0].parent;
        }

        return None;
    }

    /// The logical length of a node within the content sequence: text nodes
    /// contribute their character count, break nodes contribute 1.
    pub fn unit_len(&self, id: NodeId) -> usize {
        match self.nodes[id.0].kind {
            NodeKind::Text(ref s) => char_len(s),
            NodeKind::Break => 1,
            NodeKind::Element { .. } => 0,
        }
    }

    /// Flatten a region's children into plain text, with one `\n` per break
    /// node.
    pub fn value(&self, region: NodeId) -> String {
        let mut out = String::new();

        for child in self.children(region) {
            match self.nodes[child.0].kind {
                NodeKind::Text(ref s) => out.push_str(s),
                NodeKind::Break => out.push('\n'),
                NodeKind::Element { .. } => {},
            }
        }

        return out;
    }

    /// Replace a region's children with nodes representing `text`.
    ///
    /// Every `\n` becomes a break node, matching how a host turns assigned
    /// plain text back into markup; empty text runs produce no node.
    pub fn set_value(&mut self, region: NodeId, text: &str) {
        while !self.nodes[region.0].children.is_empty() {
            self.remove_child(region, 0);
        }

        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                let br = self.create_break();
                self.append_child(region, br);
            }

            if !part.is_empty() {
                let tn = self.create_text(part);
                self.append_child(region, tn);
            }
        }
    }

    /// Strip the region children that violate the flat-structure invariant:
    /// empty text nodes seeded by the host, and child elements that are not
    /// break nodes.
    pub fn normalize(&mut self, region: NodeId) {
        let strip: Vec<NodeId> = self
            .children(region)
            .iter()
            .copied()
            .filter(|child| match self.nodes[child.0].kind {
                NodeKind::Text(ref s) => s.is_empty(),
                NodeKind::Break => false,
                NodeKind::Element { .. } => true,
            })
            .collect();

        for child in strip {
            self.detach(child);
        }
    }

    /// Remove the characters in `[start, end)` (in character offsets) from a
    /// text node.
    pub(crate) fn text_remove(&mut self, id: NodeId, start: usize, end: usize) {
        if let NodeKind::Text(ref mut s) = self.nodes[id.0].kind {
            let bs = byte_of_char(s, start);
            let be = byte_of_char(s, end);

            if bs < be {
                s.replace_range(bs..be, "");
            }
        }
    }

    /// Split the text node at `off` characters, leaving the prefix in place
    /// and returning the detached suffix.
    pub(crate) fn text_split_off(&mut self, id: NodeId, off: usize) -> String {
        if let NodeKind::Text(ref mut s) = self.nodes[id.0].kind {
            let b = byte_of_char(s, off);

            return s.split_off(b);
        }

        return String::new();
    }
}
