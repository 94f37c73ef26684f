//! # Platform key chords
//!
//! ## Overview
//!
//! This module classifies host key events into history intents. The modifier
//! that forms the undo/redo chord is the command key on Apple-family
//! platforms and the control key elsewhere; which one applies is a capability
//! lookup on [Platform], not state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::events::InputType;

/// The host platform family, as far as key chords are concerned.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Platform {
    /// macOS, iOS, and friends: the command key forms history chords.
    Apple,

    /// Everything else: the control key forms history chords.
    #[default]
    Other,
}

impl Platform {
    /// Detect the platform this build targets.
    pub fn detect() -> Platform {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Platform::Apple
        } else {
            Platform::Other
        }
    }

    /// The modifier forming the undo/redo chord on this platform.
    pub fn history_modifier(&self) -> KeyModifiers {
        match self {
            Platform::Apple => KeyModifiers::SUPER,
            Platform::Other => KeyModifiers::CONTROL,
        }
    }
}

/// Classify a key event as a history chord: modifier+Z for undo,
/// modifier+Shift+Z for redo.
///
/// Returns `None` for anything else, including chords carrying additional
/// modifiers.
pub fn history_chord(key: &KeyEvent, platform: Platform) -> Option<InputType> {
    let KeyCode::Char(c) = key.code else {
        return None;
    };

    if !c.eq_ignore_ascii_case(&'z') {
        return None;
    }

    if !key.modifiers.contains(platform.history_modifier()) {
        return None;
    }

    let extra = key.modifiers - platform.history_modifier() - KeyModifiers::SHIFT;

    if !extra.is_empty() {
        return None;
    }

    // Shifted 'z' may arrive as an uppercase character without the SHIFT bit.
    if key.modifiers.contains(KeyModifiers::SHIFT) || c == 'Z' {
        return Some(InputType::HistoryRedo);
    } else {
        return Some(InputType::HistoryUndo);
    }
}
