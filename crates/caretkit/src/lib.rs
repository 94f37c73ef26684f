//! # caretkit
//!
//! ## Overview
//!
//! This crate implements the core of a cursor-aware editable text region, of
//! the kind usually built on top of a host `contenteditable` element: a region
//! whose content is a flat sequence of text runs and line-break markers, a
//! caret tracked as a single integer offset into that sequence, a bounded
//! undo/redo history of `(content, caret)` snapshots, and an allow-list state
//! machine that decides which editing intents may mutate the region.
//!
//! The [dom] module models the minimal slice of the host document the core
//! logic observes: a node arena with parent links, and a single document-level
//! [Selection](dom::Selection). The [cursor] module converts between the host
//! selection and integer caret offsets, and performs caret-aware content
//! insertion. The [history] module holds the bounded snapshot stack, and
//! [editor] ties everything together in a [RegionEditor] owned once per
//! region.
//!
//! The host environment drives a [RegionEditor] from its UI loop: feed it key,
//! paste, and input events as they arrive, call [RegionEditor::run_frame]
//! once per frame, and call [RegionEditor::advance] as time passes so that
//! debounced history snapshots get recorded.
//!
//! ## Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use caretkit::editor::{RegionConfig, RegionEditor};
//! use caretkit::events::{BeforeInput, InputType};
//!
//! let mut editor = RegionEditor::new("", RegionConfig::default());
//! let now = Instant::now();
//!
//! // First focus captures the pristine snapshot on the next frame.
//! editor.focus();
//! editor.run_frame(now);
//! assert_eq!(editor.history().size(), 1);
//!
//! // Type some text, then wait out the debounce quiet window.
//! editor.move_cursor_to(0);
//! editor.dispatch(BeforeInput::new(InputType::InsertText).with_data("hi"), now);
//! editor.advance(now + Duration::from_millis(500));
//!
//! assert_eq!(editor.value(), "hi");
//! assert_eq!(editor.cursor_position(), 2);
//! assert_eq!(editor.history().size(), 2);
//! ```

// Require docs for public APIs, and disable the more annoying clippy lints.
#![deny(missing_docs)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::needless_return)]

#[macro_use]
mod util;

pub mod cursor;
pub mod dom;
pub mod editor;
pub mod errors;
pub mod events;
pub mod history;
pub mod key;
pub mod sched;

pub use crossterm;

pub use self::editor::{RegionConfig, RegionEditor};
pub use self::errors::{EditError, EditResult};
pub use self::events::{BeforeInput, Disposition, InputNotification, InputType};
pub use self::history::{HistoryEntry, HistoryStack};
pub use self::key::Platform;
