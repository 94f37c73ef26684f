//! # Selection and ranges
//!
//! ## Overview
//!
//! This module contains the document-level selection: at most one [Range]
//! made of two [Boundary] points. A boundary inside an element addresses a
//! position between children (its offset is a child index); a boundary inside
//! a text node addresses a position between characters.
//!
//! The operations here mirror the host selection surface the region logic
//! depends on: collapsed-state queries, range replacement, deleting the
//! selected content, and inserting a text node at a boundary with the usual
//! text-splitting behavior.

use crate::errors::{EditError, EditResult};
use crate::util::char_len;

use super::{Dom, NodeId, NodeKind};

/// A single position within a document.
///
/// When `node` is an element, `offset` is an index into its child list, and
/// the boundary sits just before the child at that index. When `node` is a
/// text node, `offset` counts characters from its start. Break nodes have no
/// interior; a boundary on a break sits before (`offset == 0`) or after
/// (`offset >= 1`) it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Boundary {
    /// The node containing this position.
    pub node: NodeId,

    /// The offset within `node`.
    pub offset: usize,
}

impl Boundary {
    /// Create a new boundary.
    pub fn new(node: NodeId, offset: usize) -> Self {
        Boundary { node, offset }
    }
}

/// A contiguous extent between two boundaries.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Range {
    /// Where the range begins.
    pub start: Boundary,

    /// Where the range ends.
    pub end: Boundary,
}

impl Range {
    /// Create a new range.
    pub fn new(start: Boundary, end: Boundary) -> Self {
        Range { start, end }
    }

    /// Create a zero-width range at a single boundary.
    pub fn caret(at: Boundary) -> Self {
        Range { start: at, end: at }
    }

    /// Whether this range is zero-width (a caret rather than a highlighted
    /// extent).
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// The document-level selection: zero or one [Range].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    range: Option<Range>,
}

impl Selection {
    /// The current range, if any.
    pub fn range(&self) -> Option<&Range> {
        self.range.as_ref()
    }

    /// Whether the selection is absent or collapsed to a caret.
    pub fn is_collapsed(&self) -> bool {
        self.range.as_ref().map(Range::is_collapsed).unwrap_or(true)
    }

    pub(crate) fn set(&mut self, range: Range) {
        self.range = Some(range);
    }

    pub(crate) fn clear(&mut self) {
        self.range = None;
    }
}

impl Dom {
    /// The current selection range, if any.
    pub fn selection(&self) -> Option<&Range> {
        self.selection.range()
    }

    /// Replace the selection with a collapsed range at `(node, offset)`.
    pub fn set_caret(&mut self, node: NodeId, offset: usize) {
        self.selection.set(Range::caret(Boundary::new(node, offset)));
    }

    /// Replace the selection with the range between `start` and `end`.
    pub fn set_range(&mut self, start: Boundary, end: Boundary) {
        self.selection.set(Range::new(start, end));
    }

    /// Remove all ranges from the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Resolve a boundary to `(container, child index, character offset)`
    /// coordinates within the container element.
    ///
    /// The character offset is non-zero only for positions inside a text
    /// node; boundaries on break nodes resolve to the child gap before or
    /// after them.
    fn boundary_point(&self, b: &Boundary) -> Option<(NodeId, usize, usize)> {
        match *self.kind(b.node) {
            NodeKind::Element { .. } => {
                let max = self.children(b.node).len();

                Some((b.node, b.offset.min(max), 0))
            },
            NodeKind::Text(ref s) => {
                let parent = self.parent(b.node)?;
                let idx = self.child_index(parent, b.node)?;

                Some((parent, idx, b.offset.min(char_len(s))))
            },
            NodeKind::Break => {
                let parent = self.parent(b.node)?;
                let idx = self.child_index(parent, b.node)?;

                Some((parent, idx + b.offset.min(1), 0))
            },
        }
    }

    fn caret_at_point(&mut self, parent: NodeId, idx: usize, off: usize) {
        if off > 0 {
            let child = self.children(parent)[idx];

            self.set_caret(child, off);
        } else {
            self.set_caret(parent, idx);
        }
    }

    /// Delete the currently selected content, collapsing the selection to the
    /// deletion point.
    ///
    /// A collapsed or absent selection is left untouched. Selections whose
    /// boundaries do not resolve within one container are dropped instead of
    /// partially applied.
    pub fn delete_selection(&mut self) {
        let Some(range) = self.selection.range().cloned() else {
            return;
        };

        if range.is_collapsed() {
            return;
        }

        let (Some((ps, cs, os)), Some((pe, ce, oe))) =
            (self.boundary_point(&range.start), self.boundary_point(&range.end))
        else {
            self.clear_selection();
            return;
        };

        if ps != pe {
            self.clear_selection();
            return;
        }

        let parent = ps;

        // Boundary order isn't guaranteed by the host.
        let ((cs, os), (ce, oe)) = if (cs, os) <= (ce, oe) {
            ((cs, os), (ce, oe))
        } else {
            ((ce, oe), (cs, os))
        };

        if (cs, os) == (ce, oe) {
            // Distinct boundaries describing the same position.
            self.caret_at_point(parent, cs, os);
            return;
        }

        let ids = self.children(parent).to_vec();

        if cs == ce {
            // Both endpoints fall inside one text child.
            let child = ids[cs];

            self.text_remove(child, os, oe);

            if self.unit_len(child) == 0 {
                self.remove_child(parent, cs);
                self.set_caret(parent, cs);
            } else {
                self.set_caret(child, os);
            }

            return;
        }

        // The start child survives iff the start boundary is inside its text.
        let keep_start = os > 0;

        if keep_start {
            let len = self.unit_len(ids[cs]);

            self.text_remove(ids[cs], os, len);
        }

        // The end child survives iff the end boundary leaves a suffix.
        let mut remove_to = ce;

        if oe > 0 && ce < ids.len() {
            if oe >= self.unit_len(ids[ce]) {
                remove_to = ce + 1;
            } else {
                self.text_remove(ids[ce], 0, oe);
            }
        }

        let remove_from = if keep_start { cs + 1 } else { cs };

        for idx in (remove_from..remove_to).rev() {
            self.remove_child(parent, idx);
        }

        if keep_start {
            self.set_caret(ids[cs], os);
        } else {
            self.set_caret(parent, cs);
        }
    }

    /// Insert a new text node holding `text` at a boundary, returning its id.
    ///
    /// A boundary in the middle of an existing text node splits it, and the
    /// new node lands between the halves.
    pub fn insert_text_node_at(&mut self, at: Boundary, text: &str) -> EditResult<NodeId> {
        match *self.kind(at.node) {
            NodeKind::Element { .. } => {
                let node = self.create_text(text);

                self.insert_child(at.node, at.offset, node);

                return Ok(node);
            },
            NodeKind::Text(ref s) => {
                let len = char_len(s);
                let off = at.offset.min(len);
                let parent = self.parent(at.node).ok_or(EditError::DetachedNode)?;
                let idx = self.child_index(parent, at.node).ok_or(EditError::DetachedNode)?;
                let node = self.create_text(text);

                if off == 0 {
                    self.insert_child(parent, idx, node);
                } else if off == len {
                    self.insert_child(parent, idx + 1, node);
                } else {
                    let rest = self.text_split_off(at.node, off);
                    let right = self.create_text(rest);

                    self.insert_child(parent, idx + 1, node);
                    self.insert_child(parent, idx + 2, right);
                }

                return Ok(node);
            },
            NodeKind::Break => {
                let parent = self.parent(at.node).ok_or(EditError::DetachedNode)?;
                let idx = self.child_index(parent, at.node).ok_or(EditError::DetachedNode)?;
                let node = self.create_text(text);

                self.insert_child(parent, idx + at.offset.min(1), node);

                return Ok(node);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_with(dom: &mut Dom, value: &str) -> NodeId {
        let region = dom.create_region();
        dom.set_value(region, value);

        return region;
    }

    #[test]
    fn test_delete_selection_within_text() {
        let mut dom = Dom::new();
        let region = region_with(&mut dom, "hello");
        let tn = dom.children(region)[0];

        dom.set_range(Boundary::new(tn, 1), Boundary::new(tn, 4));
        dom.delete_selection();

        assert_eq!(dom.value(region), "ho");
        assert_eq!(dom.selection(), Some(&Range::caret(Boundary::new(tn, 1))));
    }

    #[test]
    fn test_delete_selection_whole_text_node() {
        let mut dom = Dom::new();
        let region = region_with(&mut dom, "hi");
        let tn = dom.children(region)[0];

        dom.set_range(Boundary::new(tn, 0), Boundary::new(tn, 2));
        dom.delete_selection();

        assert_eq!(dom.value(region), "");
        assert_eq!(dom.children(region).len(), 0);
        assert_eq!(dom.selection(), Some(&Range::caret(Boundary::new(region, 0))));
    }

    #[test]
    fn test_delete_selection_across_break() {
        let mut dom = Dom::new();
        let region = region_with(&mut dom, "ab\ncd");
        let first = dom.children(region)[0];
        let last = dom.children(region)[2];

        dom.set_range(Boundary::new(first, 1), Boundary::new(last, 1));
        dom.delete_selection();

        assert_eq!(dom.value(region), "ad");
        assert_eq!(dom.selection(), Some(&Range::caret(Boundary::new(first, 1))));
    }

    #[test]
    fn test_delete_selection_region_level() {
        let mut dom = Dom::new();
        let region = region_with(&mut dom, "ab\ncd");

        // Everything between the child gaps around the break.
        dom.set_range(Boundary::new(region, 0), Boundary::new(region, 2));
        dom.delete_selection();

        assert_eq!(dom.value(region), "cd");
        assert_eq!(dom.selection(), Some(&Range::caret(Boundary::new(region, 0))));
    }

    #[test]
    fn test_delete_selection_reversed_range() {
        let mut dom = Dom::new();
        let region = region_with(&mut dom, "hello");
        let tn = dom.children(region)[0];

        dom.set_range(Boundary::new(tn, 4), Boundary::new(tn, 1));
        dom.delete_selection();

        assert_eq!(dom.value(region), "ho");
    }

    #[test]
    fn test_delete_selection_collapsed_noop() {
        let mut dom = Dom::new();
        let region = region_with(&mut dom, "hello");
        let tn = dom.children(region)[0];

        dom.set_caret(tn, 2);
        dom.delete_selection();

        assert_eq!(dom.value(region), "hello");
        assert_eq!(dom.selection(), Some(&Range::caret(Boundary::new(tn, 2))));
    }

    #[test]
    fn test_delete_selection_end_suffix_survives() {
        let mut dom = Dom::new();
        let region = region_with(&mut dom, "ab\ncd");
        let last = dom.children(region)[2];

        dom.set_range(Boundary::new(region, 0), Boundary::new(last, 1));
        dom.delete_selection();

        assert_eq!(dom.value(region), "d");
        assert_eq!(dom.selection(), Some(&Range::caret(Boundary::new(region, 0))));
    }

    #[test]
    fn test_insert_text_node_splits() {
        let mut dom = Dom::new();
        let region = region_with(&mut dom, "held");
        let tn = dom.children(region)[0];

        let node = dom.insert_text_node_at(Boundary::new(tn, 2), "llo wor").unwrap();

        assert_eq!(dom.value(region), "hello world");
        assert_eq!(dom.children(region).len(), 3);
        assert_eq!(dom.children(region)[1], node);
    }

    #[test]
    fn test_insert_text_node_at_edges() {
        let mut dom = Dom::new();
        let region = region_with(&mut dom, "bc");
        let tn = dom.children(region)[0];

        dom.insert_text_node_at(Boundary::new(tn, 0), "a").unwrap();
        assert_eq!(dom.value(region), "abc");

        dom.insert_text_node_at(Boundary::new(tn, 2), "d").unwrap();
        assert_eq!(dom.value(region), "abcd");

        dom.insert_text_node_at(Boundary::new(region, 0), "z").unwrap();
        assert_eq!(dom.value(region), "zabcd");
    }

    #[test]
    fn test_insert_text_node_detached() {
        let mut dom = Dom::new();
        let tn = dom.create_text("alone");

        let res = dom.insert_text_node_at(Boundary::new(tn, 1), "x");

        assert_eq!(res, Err(EditError::DetachedNode));
    }
}
