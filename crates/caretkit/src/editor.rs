//! # Region editor
//!
//! ## Overview
//!
//! This module contains [RegionEditor], the controller owning one editable
//! region: its document, its history stack, and the deferred work both
//! require. The editor is the gatekeeper for editing intents: each
//! pre-mutation [BeforeInput] is either blocked outright, performed manually
//! with an explicit caret placement, or allowed through to the host's native
//! mutation.
//!
//! Whichever path an intent takes, a post-mutation [InputNotification]
//! follows once the content reflects the edit: synchronously for native
//! mutations, and on the next frame for manual ones, matching the ordering a
//! host provides natively. Qualifying notifications schedule a debounced
//! history snapshot, so a burst of edits collapses into one entry.
//!
//! The host drives the editor from its UI loop:
//!
//! - deliver key, paste, drop, and input events as they arrive;
//! - call [RegionEditor::run_frame] once per frame, before repaint;
//! - call [RegionEditor::advance] as time passes so debounced snapshots get
//!   recorded.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use crate::cursor;
use crate::dom::{Dom, NodeId};
use crate::events::{BeforeInput, Disposition, InputNotification, InputType};
use crate::history::{HistoryEntry, HistoryStack};
use crate::key::{history_chord, Platform};
use crate::sched::{Debounce, FrameQueue};
use crate::util::byte_of_char;

/// Tunables for a [RegionEditor].
#[derive(Clone, Debug)]
pub struct RegionConfig {
    history_depth: usize,
    debounce_window: Duration,
}

impl RegionConfig {
    /// Set how many history entries the region keeps.
    pub fn history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    /// Set the quiet window used to coalesce edits into one history
    /// snapshot.
    pub fn debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        RegionConfig {
            history_depth: 20,
            debounce_window: Duration::from_millis(300),
        }
    }
}

/// Work deferred to the next frame.
#[derive(Debug)]
enum FrameTask {
    /// Deliver a synthesized post-mutation notification.
    Notify(InputType),

    /// Capture the pristine first-focus snapshot.
    CaptureInitial,
}

/// The controller for one editable region.
///
/// Owns the document, the region node, the history stack, and all deferred
/// work; everything is mutated from host event callbacks on one thread.
#[derive(Debug)]
pub struct RegionEditor {
    dom: Dom,
    region: NodeId,
    history: HistoryStack,
    pending: Debounce<HistoryEntry>,
    frames: FrameQueue<FrameTask>,
    platform: Platform,
}

impl RegionEditor {
    /// Create an editor for a region holding `value`.
    pub fn new(value: &str, config: RegionConfig) -> Self {
        let mut dom = Dom::new();
        let region = dom.create_region();

        dom.set_value(region, value);
        dom.normalize(region);

        RegionEditor {
            dom,
            region,
            history: HistoryStack::new(config.history_depth),
            pending: Debounce::new(config.debounce_window),
            frames: FrameQueue::new(),
            platform: Platform::detect(),
        }
    }

    /// Override the detected platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// The document this editor operates on.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access to the document, for host-driven selection updates
    /// (clicks, arrow keys) and inspection.
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// The region element node.
    pub fn region(&self) -> NodeId {
        self.region
    }

    /// The region's plain-text content.
    pub fn value(&self) -> String {
        self.dom.value(self.region)
    }

    /// The caret offset into the region, or 0 when undefined.
    pub fn cursor_position(&self) -> usize {
        cursor::cursor_position(&self.dom)
    }

    /// Place the caret at an offset into the region.
    pub fn move_cursor_to(&mut self, pos: usize) {
        cursor::move_cursor_to(&mut self.dom, self.region, pos);
    }

    /// The history stack.
    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Notify the editor that the region gained focus.
    ///
    /// The first focus with an empty history captures a pristine snapshot so
    /// undo can return to the initial state. The capture is deferred one
    /// frame: the caret offset immediately on focus is unreliable before
    /// layout settles.
    pub fn focus(&mut self) {
        if self.history.size() == 0 {
            self.frames.push(FrameTask::CaptureInitial);
        }
    }

    /// Feed a key event, returning whether its default action should be
    /// suppressed.
    ///
    /// Only the platform history chords are intercepted; they synthesize
    /// history-undo/history-redo intents.
    pub fn key_down(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if let Some(ty) = history_chord(key, self.platform) {
            self.dispatch(BeforeInput::new(ty), now);
            return true;
        }

        return false;
    }

    /// Feed pasted clipboard text.
    ///
    /// The native paste is always suppressed at the clipboard layer; a
    /// non-empty payload synthesizes a paste-insert intent instead.
    pub fn paste(&mut self, text: &str, now: Instant) {
        if !text.is_empty() {
            self.dispatch(BeforeInput::new(InputType::InsertFromPaste).with_data(text), now);
        }
    }

    /// Feed text dropped onto the region.
    pub fn drop_text(&mut self, text: &str, now: Instant) {
        self.dispatch(
            BeforeInput::new(InputType::InsertFromDrop).with_data_transfer(text),
            now,
        );
    }

    /// Feed a pre-mutation intent carrying a raw host input-type string.
    ///
    /// Anything outside the allow-list is blocked here, before dispatch.
    pub fn before_input_raw(
        &mut self,
        input_type: &str,
        data: Option<&str>,
        now: Instant,
    ) -> Disposition {
        match input_type.parse::<InputType>() {
            Ok(ty) => {
                let mut ev = BeforeInput::new(ty);

                if let Some(data) = data {
                    ev = ev.with_data(data);
                }

                return self.before_input(&ev, now);
            },
            Err(_) => {
                log::trace!("blocked input type {input_type:?}");

                return Disposition::Prevent;
            },
        }
    }

    /// Classify a pre-mutation intent and perform any manual mutation it
    /// calls for.
    ///
    /// Returns [Disposition::Allow] when the host's native mutation should
    /// proceed; the host must then deliver the post-mutation notification via
    /// [RegionEditor::input]. For intercepted intents, the notification is
    /// synthesized on the next frame, after the mutation is already visible.
    pub fn before_input(&mut self, ev: &BeforeInput, now: Instant) -> Disposition {
        let _ = now;

        match ev.input_type {
            InputType::HistoryUndo => {
                if let Some(entry) = self.history.undo().cloned() {
                    self.apply_snapshot(&entry);
                    self.frames.push(FrameTask::Notify(InputType::HistoryUndo));
                }

                return Disposition::Prevent;
            },
            InputType::HistoryRedo => {
                if let Some(entry) = self.history.redo().cloned() {
                    self.apply_snapshot(&entry);
                    self.frames.push(FrameTask::Notify(InputType::HistoryRedo));
                }

                return Disposition::Prevent;
            },
            InputType::InsertFromPaste => {
                let data = ev.data.as_deref().unwrap_or("");

                if cursor::insert_content(&mut self.dom, data, false).is_ok() {
                    self.frames.push(FrameTask::Notify(InputType::InsertFromPaste));
                }

                return Disposition::Prevent;
            },
            InputType::InsertFromDrop => {
                let data = ev.data_transfer.as_deref().unwrap_or("");

                if !data.is_empty() &&
                    cursor::insert_content(&mut self.dom, data, false).is_ok()
                {
                    self.frames.push(FrameTask::Notify(InputType::InsertFromDrop));
                }

                return Disposition::Prevent;
            },
            InputType::InsertParagraph | InputType::InsertLineBreak => {
                // Inserting the two-newline sequence ourselves keeps the
                // region flat; the native mutation would create nested block
                // elements.
                if cursor::insert_content(&mut self.dom, "\n\n", true).is_ok() {
                    self.frames.push(FrameTask::Notify(ev.input_type));
                }

                return Disposition::Prevent;
            },
            InputType::InsertText |
            InputType::InsertCompositionText |
            InputType::DeleteContentBackward |
            InputType::DeleteContentForward |
            InputType::DeleteByCut |
            InputType::DeleteByDrag => {
                return Disposition::Allow;
            },
        }
    }

    /// Deliver a post-mutation notification: the region content already
    /// reflects the edit.
    ///
    /// History replays do not re-push; everything else schedules a debounced
    /// snapshot of the current content and caret.
    pub fn input(&mut self, note: &InputNotification, now: Instant) {
        log::trace!("input notification: {}", note.input_type);

        if note.input_type.is_history() {
            return;
        }

        let content = self.value();
        let pos = self.cursor_position();

        log::debug!("value changed: {content:?}");

        self.pending.schedule(HistoryEntry::new(content, pos), now);
    }

    /// Run an intent through the full cycle: gatekeeping, the default
    /// mutation when allowed, and the synchronous post-mutation
    /// notification.
    ///
    /// This is the convenience entry point for hosts that want the crate's
    /// emulation of the native default actions; hosts performing their own
    /// mutations use [RegionEditor::before_input] and [RegionEditor::input]
    /// directly.
    pub fn dispatch(&mut self, ev: BeforeInput, now: Instant) {
        match self.before_input(&ev, now) {
            Disposition::Prevent => {},
            Disposition::Allow => {
                self.apply_default(&ev);
                self.input(&InputNotification::new(ev.input_type), now);
            },
        }
    }

    /// Run the tasks queued for this frame.
    pub fn run_frame(&mut self, now: Instant) {
        for task in self.frames.drain() {
            match task {
                FrameTask::Notify(ty) => {
                    self.input(&InputNotification::new(ty), now);
                },
                FrameTask::CaptureInitial => {
                    if self.history.size() == 0 {
                        let entry = HistoryEntry::new(self.value(), self.cursor_position());

                        self.history.push_initial(entry);
                    }
                },
            }
        }
    }

    /// Let deferred work catch up with the clock, recording any debounced
    /// snapshot whose quiet window has elapsed.
    pub fn advance(&mut self, now: Instant) {
        if let Some(entry) = self.pending.poll(now) {
            self.history.push(entry);
        }
    }

    fn apply_snapshot(&mut self, entry: &HistoryEntry) {
        self.dom.set_value(self.region, &entry.content);
        cursor::move_cursor_to(&mut self.dom, self.region, entry.pos);
    }

    /// The native default action for the intents the gatekeeper lets
    /// through.
    fn apply_default(&mut self, ev: &BeforeInput) {
        match ev.input_type {
            InputType::InsertText | InputType::InsertCompositionText => {
                let data = ev.data.as_deref().unwrap_or("");

                if !data.is_empty() {
                    let _ = cursor::insert_content(&mut self.dom, data, false);
                }
            },
            InputType::DeleteContentBackward => {
                self.delete_unit(true);
            },
            InputType::DeleteContentForward => {
                self.delete_unit(false);
            },
            InputType::DeleteByCut | InputType::DeleteByDrag => {
                self.dom.delete_selection();
            },
            _ => {
                // Intercepted intents never reach the default action.
            },
        }
    }

    /// Delete one logical unit beside a collapsed caret, or the selection
    /// when one exists.
    fn delete_unit(&mut self, backward: bool) {
        let Some(range) = self.dom.selection().cloned() else {
            return;
        };

        if !range.is_collapsed() {
            self.dom.delete_selection();
            return;
        }

        if self.dom.find_editable_region(range.start.node) != Some(self.region) {
            return;
        }

        let pos = self.cursor_position();
        let value = self.value();
        let total = value.chars().count();

        let (start, end) = if backward {
            if pos == 0 {
                return;
            }

            (pos - 1, pos)
        } else {
            if pos >= total {
                return;
            }

            (pos, pos + 1)
        };

        let mut value = value;
        let bs = byte_of_char(&value, start);
        let be = byte_of_char(&value, end);

        value.replace_range(bs..be, "");

        self.dom.set_value(self.region, &value);
        cursor::move_cursor_to(&mut self.dom, self.region, start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::{KeyCode, KeyModifiers};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn editor(value: &str) -> (RegionEditor, Instant) {
        let editor = RegionEditor::new(value, RegionConfig::default())
            .with_platform(Platform::Other);

        (editor, Instant::now())
    }

    fn insert(editor: &mut RegionEditor, text: &str, now: Instant) {
        editor.dispatch(BeforeInput::new(InputType::InsertText).with_data(text), now);
    }

    #[test]
    fn test_plain_typing() {
        let (mut editor, t0) = editor("");

        editor.move_cursor_to(0);

        // Two inserts beyond the quiet window produce two entries.
        insert(&mut editor, "a", t0);
        editor.advance(t0 + ms(500));
        insert(&mut editor, "b", t0 + ms(500));
        editor.advance(t0 + ms(1000));

        assert_eq!(editor.value(), "ab");
        assert_eq!(editor.history().size(), 2);
        assert_eq!(editor.history().entries()[0], HistoryEntry::new("a", 1));
        assert_eq!(editor.history().entries()[1], HistoryEntry::new("ab", 2));
    }

    #[test]
    fn test_initial_capture_on_focus() {
        let (mut editor, t0) = editor("");

        editor.focus();

        // Deferred one frame; nothing is captured synchronously.
        assert_eq!(editor.history().size(), 0);

        editor.run_frame(t0);

        assert_eq!(editor.history().size(), 1);
        assert_eq!(editor.history().current(), Some(&HistoryEntry::new("", 0)));

        // Refocusing doesn't capture again.
        editor.focus();
        editor.run_frame(t0);

        assert_eq!(editor.history().size(), 1);
    }

    #[test]
    fn test_paragraph_insert_at_end() {
        let (mut editor, t0) = editor("ab");

        editor.move_cursor_to(2);
        editor.dispatch(BeforeInput::new(InputType::InsertParagraph), t0);

        assert_eq!(editor.value(), "ab\n\n");

        // Between the two break units, not after them.
        assert_eq!(editor.cursor_position(), 3);

        editor.run_frame(t0);
        editor.advance(t0 + ms(500));

        assert_eq!(editor.history().current(), Some(&HistoryEntry::new("ab\n\n", 3)));
    }

    #[test]
    fn test_undo_after_burst() {
        let (mut editor, t0) = editor("");

        editor.focus();
        editor.run_frame(t0);
        editor.move_cursor_to(0);

        // A burst within one quiet window coalesces into one entry.
        for (i, ch) in ["h", "e", "l", "l", "o"].iter().enumerate() {
            insert(&mut editor, ch, t0 + ms(i as u64 * 10));
        }

        editor.advance(t0 + ms(1000));

        assert_eq!(editor.history().size(), 2);
        assert_eq!(editor.history().current(), Some(&HistoryEntry::new("hello", 5)));

        let undo = key_event!('z', KeyModifiers::CONTROL);
        assert!(editor.key_down(&undo, t0 + ms(1000)));
        editor.run_frame(t0 + ms(1000));

        assert_eq!(editor.value(), "");
        assert_eq!(editor.cursor_position(), 0);

        // The replay notification didn't re-push.
        assert_eq!(editor.history().size(), 2);
        assert_eq!(editor.history().index(), Some(0));
    }

    #[test]
    fn test_redo_after_undo() {
        let (mut editor, t0) = editor("");

        editor.focus();
        editor.run_frame(t0);
        editor.move_cursor_to(0);
        insert(&mut editor, "hi", t0);
        editor.advance(t0 + ms(500));

        let undo = key_event!('z', KeyModifiers::CONTROL);
        let redo = key_event!('z', KeyModifiers::CONTROL | KeyModifiers::SHIFT);

        editor.key_down(&undo, t0 + ms(500));
        assert_eq!(editor.value(), "");

        editor.key_down(&redo, t0 + ms(500));
        assert_eq!(editor.value(), "hi");
        assert_eq!(editor.cursor_position(), 2);
    }

    #[test]
    fn test_undo_at_bottom_is_noop() {
        let (mut editor, t0) = editor("seed");

        editor.focus();
        editor.run_frame(t0);

        let undo = key_event!('z', KeyModifiers::CONTROL);

        // Prevented, but nothing to restore and no notification queued.
        assert!(editor.key_down(&undo, t0));
        assert_eq!(editor.value(), "seed");
        assert_eq!(editor.history().index(), Some(0));

        editor.run_frame(t0);
        editor.advance(t0 + ms(500));

        assert_eq!(editor.history().size(), 1);
    }

    #[test]
    fn test_paste() {
        let (mut editor, t0) = editor("ab");

        editor.move_cursor_to(0);
        editor.paste("xyz", t0);

        assert_eq!(editor.value(), "xyzab");
        assert_eq!(editor.cursor_position(), 3);

        editor.run_frame(t0);
        editor.advance(t0 + ms(500));

        assert_eq!(editor.history().current(), Some(&HistoryEntry::new("xyzab", 3)));
    }

    #[test]
    fn test_empty_paste_ignored() {
        let (mut editor, t0) = editor("ab");

        editor.move_cursor_to(1);
        editor.paste("", t0);

        assert_eq!(editor.value(), "ab");
        assert!(editor.history().size() == 0);
    }

    #[test]
    fn test_paste_replaces_selection() {
        let (mut editor, t0) = editor("hello");

        let region = editor.region();
        let tn = editor.dom().children(region)[0];

        {
            use crate::dom::Boundary;

            editor.dom_mut().set_range(Boundary::new(tn, 1), Boundary::new(tn, 4));
        }

        editor.paste("-", t0);

        assert_eq!(editor.value(), "h-o");
        assert_eq!(editor.cursor_position(), 2);
    }

    #[test]
    fn test_drop_requires_payload() {
        let (mut editor, t0) = editor("ab");

        editor.move_cursor_to(2);
        editor.drop_text("", t0);

        assert_eq!(editor.value(), "ab");

        editor.run_frame(t0);
        editor.advance(t0 + ms(500));
        assert_eq!(editor.history().size(), 0);

        editor.drop_text("cd", t0);

        assert_eq!(editor.value(), "abcd");
        assert_eq!(editor.cursor_position(), 4);
    }

    #[test]
    fn test_unrecognized_intent_blocked() {
        let (mut editor, t0) = editor("ab");

        editor.move_cursor_to(2);

        let disp = editor.before_input_raw("formatBold", None, t0);

        assert_eq!(disp, Disposition::Prevent);
        assert_eq!(editor.value(), "ab");

        editor.run_frame(t0);
        editor.advance(t0 + ms(500));
        assert_eq!(editor.history().size(), 0);
    }

    #[test]
    fn test_delete_backward() {
        let (mut editor, t0) = editor("abc");

        editor.move_cursor_to(2);
        editor.dispatch(BeforeInput::new(InputType::DeleteContentBackward), t0);

        assert_eq!(editor.value(), "ac");
        assert_eq!(editor.cursor_position(), 1);
    }

    #[test]
    fn test_delete_backward_across_break() {
        let (mut editor, t0) = editor("a\nb");

        editor.move_cursor_to(2);
        editor.dispatch(BeforeInput::new(InputType::DeleteContentBackward), t0);

        assert_eq!(editor.value(), "ab");
        assert_eq!(editor.cursor_position(), 1);
    }

    #[test]
    fn test_delete_backward_at_start() {
        let (mut editor, t0) = editor("ab");

        editor.move_cursor_to(0);
        editor.dispatch(BeforeInput::new(InputType::DeleteContentBackward), t0);

        assert_eq!(editor.value(), "ab");
    }

    #[test]
    fn test_delete_forward() {
        let (mut editor, t0) = editor("abc");

        editor.move_cursor_to(1);
        editor.dispatch(BeforeInput::new(InputType::DeleteContentForward), t0);

        assert_eq!(editor.value(), "ac");
        assert_eq!(editor.cursor_position(), 1);

        editor.move_cursor_to(2);
        editor.dispatch(BeforeInput::new(InputType::DeleteContentForward), t0);

        assert_eq!(editor.value(), "ac");
    }

    #[test]
    fn test_cut_deletes_selection() {
        let (mut editor, t0) = editor("hello");

        let region = editor.region();
        let tn = editor.dom().children(region)[0];

        {
            use crate::dom::Boundary;

            editor.dom_mut().set_range(Boundary::new(tn, 0), Boundary::new(tn, 4));
        }

        editor.dispatch(BeforeInput::new(InputType::DeleteByCut), t0);

        assert_eq!(editor.value(), "o");
        assert_eq!(editor.cursor_position(), 0);
    }

    #[test]
    fn test_cut_with_caret_is_noop() {
        let (mut editor, t0) = editor("hello");

        editor.move_cursor_to(3);
        editor.dispatch(BeforeInput::new(InputType::DeleteByCut), t0);

        assert_eq!(editor.value(), "hello");
        assert_eq!(editor.cursor_position(), 3);
    }

    #[test]
    fn test_burst_then_branch_truncation() {
        let (mut editor, t0) = editor("");

        editor.focus();
        editor.run_frame(t0);
        editor.move_cursor_to(0);

        insert(&mut editor, "one", t0);
        editor.advance(t0 + ms(500));
        insert(&mut editor, " two", t0 + ms(500));
        editor.advance(t0 + ms(1000));

        assert_eq!(editor.history().size(), 3);

        // Undo once, then edit; the redo branch is gone.
        let undo = key_event!('z', KeyModifiers::CONTROL);
        editor.key_down(&undo, t0 + ms(1000));
        assert_eq!(editor.value(), "one");

        insert(&mut editor, "!", t0 + ms(1000));
        editor.advance(t0 + ms(1500));

        assert_eq!(editor.value(), "one!");
        assert_eq!(editor.history().size(), 3);

        let redo = key_event!('z', KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        editor.key_down(&redo, t0 + ms(1500));

        assert_eq!(editor.value(), "one!");
    }

    #[test]
    fn test_normalizes_seeded_content() {
        let (mut editor, _) = editor("");

        // Hosts may seed stray empty text nodes; none survive construction.
        assert_eq!(editor.dom().children(editor.region()).len(), 0);

        let region = editor.region();
        let stray = editor.dom_mut().create_text("");
        editor.dom_mut().append_child(region, stray);
        editor.dom_mut().normalize(region);

        assert_eq!(editor.dom().children(region).len(), 0);
    }
}
