//! # Input intents
//!
//! ## Overview
//!
//! This module contains the closed set of editing intents the region
//! recognizes, along with the pre-mutation ([BeforeInput]) and post-mutation
//! ([InputNotification]) event shapes exchanged with the host.
//!
//! Host input-type strings parse into [InputType] via [FromStr]; anything
//! outside the allow-list fails to parse and is blocked at that boundary, so
//! downstream dispatch can match exhaustively.

use std::fmt;
use std::str::FromStr;

use crate::errors::EditError;

/// The whitelisted editing intents.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InputType {
    /// A new paragraph (plain Enter).
    InsertParagraph,

    /// A soft line break (Shift+Enter).
    InsertLineBreak,

    /// Plain text typed into the region.
    InsertText,

    /// Text committed through an input-method composition.
    InsertCompositionText,

    /// Text inserted from the clipboard.
    InsertFromPaste,

    /// Text dragged in from elsewhere.
    InsertFromDrop,

    /// Deletion behind the caret (Backspace).
    DeleteContentBackward,

    /// Deletion ahead of the caret (Delete).
    DeleteContentForward,

    /// Deletion of the selection by a cut.
    DeleteByCut,

    /// Deletion of the selection by dragging it elsewhere.
    DeleteByDrag,

    /// A request to undo the last recorded edit.
    HistoryUndo,

    /// A request to redo a previously undone edit.
    HistoryRedo,
}

impl InputType {
    /// The host wire string for this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::InsertParagraph => "insertParagraph",
            InputType::InsertLineBreak => "insertLineBreak",
            InputType::InsertText => "insertText",
            InputType::InsertCompositionText => "insertCompositionText",
            InputType::InsertFromPaste => "insertFromPaste",
            InputType::InsertFromDrop => "insertFromDrop",
            InputType::DeleteContentBackward => "deleteContentBackward",
            InputType::DeleteContentForward => "deleteContentForward",
            InputType::DeleteByCut => "deleteByCut",
            InputType::DeleteByDrag => "deleteByDrag",
            InputType::HistoryUndo => "historyUndo",
            InputType::HistoryRedo => "historyRedo",
        }
    }

    /// Whether this intent replays history rather than describing a new edit.
    pub fn is_history(&self) -> bool {
        matches!(self, InputType::HistoryUndo | InputType::HistoryRedo)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = EditError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let ty = match input {
            "insertParagraph" => InputType::InsertParagraph,
            "insertLineBreak" => InputType::InsertLineBreak,
            "insertText" => InputType::InsertText,
            "insertCompositionText" => InputType::InsertCompositionText,
            "insertFromPaste" => InputType::InsertFromPaste,
            "insertFromDrop" => InputType::InsertFromDrop,
            "deleteContentBackward" => InputType::DeleteContentBackward,
            "deleteContentForward" => InputType::DeleteContentForward,
            "deleteByCut" => InputType::DeleteByCut,
            "deleteByDrag" => InputType::DeleteByDrag,
            "historyUndo" => InputType::HistoryUndo,
            "historyRedo" => InputType::HistoryRedo,
            _ => return Err(EditError::UnknownInputType(input.to_string())),
        };

        return Ok(ty);
    }
}

/// A pre-mutation editing intent, before any content has changed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BeforeInput {
    /// The classified intent.
    pub input_type: InputType,

    /// The text payload carried by insert intents.
    pub data: Option<String>,

    /// The plain-text payload of a drag-and-drop transfer.
    pub data_transfer: Option<String>,
}

impl BeforeInput {
    /// Create an intent without payloads.
    pub fn new(input_type: InputType) -> Self {
        BeforeInput { input_type, data: None, data_transfer: None }
    }

    /// Attach a text payload.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Attach a drag-and-drop transfer payload.
    pub fn with_data_transfer(mut self, data: impl Into<String>) -> Self {
        self.data_transfer = Some(data.into());
        self
    }
}

/// What the gatekeeper decided about an intent's default action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Disposition {
    /// The host should let the native mutation proceed.
    Allow,

    /// The default action was suppressed; any required mutation has already
    /// been performed manually.
    Prevent,
}

impl Disposition {
    /// Whether the default action was suppressed.
    pub fn is_prevented(&self) -> bool {
        matches!(self, Disposition::Prevent)
    }
}

/// A post-mutation notification: the content already reflects the edit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InputNotification {
    /// The intent that produced the mutation.
    pub input_type: InputType,
}

impl InputNotification {
    /// Create a notification for an intent.
    pub fn new(input_type: InputType) -> Self {
        InputNotification { input_type }
    }
}
