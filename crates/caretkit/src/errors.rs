//! # Error Types
//!
//! ## Overview
//!
//! This module contains the error types shared by the components in this
//! crate. Most region operations act on best-effort selection state that can
//! legitimately be absent, so they absorb those conditions locally and only
//! surface the few failures a caller needs to branch on.

/// Errors returned from region editing operations.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum EditError {
    /// Failure due to lack of a current selection.
    #[error("No current selection")]
    NoSelection,

    /// Failure to insert content at a node without a parent.
    #[error("Node is not attached to the document")]
    DetachedNode,

    /// Failure to interpret a host input-type string.
    #[error("Unrecognized input type: {0:?}")]
    UnknownInputType(String),
}

/// Common result type for editing operations.
pub type EditResult<V = ()> = Result<V, EditError>;
