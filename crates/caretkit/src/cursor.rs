//! # Position Codec
//!
//! ## Overview
//!
//! This module converts between the document selection and an integer caret
//! offset into a region's logical content sequence, where a text node
//! contributes its character count and a break node contributes one unit.
//!
//! [cursor_position] encodes the current caret as an offset;
//! [move_cursor_to] rebuilds a collapsed selection from an offset; and
//! [insert_content] performs caret-aware text insertion, including the
//! two-newline paragraph rule where the caret must land between the inserted
//! newline characters.

use crate::dom::{Dom, NodeId, NodeKind};
use crate::errors::{EditError, EditResult};
use crate::util::char_len;

/// Encode the current selection as an offset into its editable region.
///
/// Returns 0 whenever no caret position is defined: the selection is absent,
/// spans a range rather than a caret, or lies outside any editable region.
pub fn cursor_position(dom: &Dom) -> usize {
    let Some(range) = dom.selection() else {
        return 0;
    };

    if !range.is_collapsed() {
        return 0;
    }

    let anchor = range.start;

    let Some(region) = dom.find_editable_region(anchor.node) else {
        return 0;
    };

    // The anchor is the region itself when the caret sits at a child-index
    // boundary, which happens whenever it rests beside a break node rather
    // than inside text.
    if dom.is_editable_region(anchor.node) {
        let children = dom.children(region);
        let upto = anchor.offset.min(children.len());

        return children[..upto].iter().map(|c| dom.unit_len(*c)).sum();
    }

    if dom.is_text(anchor.node) {
        let mut pos = 0;

        for child in dom.children(region) {
            if *child == anchor.node {
                return pos + anchor.offset;
            }

            pos += dom.unit_len(*child);
        }
    }

    // Unreachable for well-formed regions.
    return 0;
}

/// Replace the selection with a collapsed range at offset `pos` within
/// `region`.
///
/// The caret lands inside the text node whose extent reaches the target, or
/// immediately after the break node whose end equals it; break nodes have no
/// interior offsets. Targets past the end of the content clamp to the end of
/// the region.
pub fn move_cursor_to(dom: &mut Dom, region: NodeId, pos: usize) {
    if pos == 0 {
        dom.set_caret(region, 0);
        return;
    }

    let children = dom.children(region).to_vec();
    let mut acc = 0;

    for (i, child) in children.iter().enumerate() {
        match *dom.kind(*child) {
            NodeKind::Text(ref s) => {
                let len = char_len(s);

                if acc + len >= pos {
                    dom.set_caret(*child, pos - acc);
                    return;
                }

                acc += len;
            },
            NodeKind::Break => {
                acc += 1;

                if acc == pos {
                    dom.set_caret(region, i + 1);
                    return;
                }
            },
            NodeKind::Element { .. } => {},
        }
    }

    dom.set_caret(region, children.len());
}

/// Insert `text` at the current selection as a fresh text node.
///
/// A non-collapsed selection is deleted first. When `first_line_break` is
/// set, the caret is placed at offset 1 inside the inserted node instead of
/// at its end; this is used when inserting the synthetic two-newline sequence
/// for a paragraph break, since a native caret never rests after a trailing
/// newline.
pub fn insert_content(dom: &mut Dom, text: &str, first_line_break: bool) -> EditResult<()> {
    if dom.selection().is_none() {
        return Err(EditError::NoSelection);
    }

    if !dom.selection().map(|r| r.is_collapsed()).unwrap_or(false) {
        dom.delete_selection();
    }

    let Some(range) = dom.selection().cloned() else {
        return Err(EditError::NoSelection);
    };

    dom.clear_selection();

    let node = dom.insert_text_node_at(range.start, text)?;

    if first_line_break {
        dom.set_caret(node, 1);
    } else {
        dom.set_caret(node, char_len(text));
    }

    return Ok(());
}
