//! # Deferred-call primitives
//!
//! ## Overview
//!
//! This module contains deterministic stand-ins for the two deferred
//! execution services the host loop provides: a cancel-and-restart debounce
//! timer, and a queue of single-shot tasks run on the next frame. Both are
//! data-driven rather than callback-driven so a single-threaded host loop
//! (or a test) can drive them explicitly.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// A single pending value guarded by a quiet window.
///
/// Each [schedule](Debounce::schedule) replaces any pending value and
/// restarts the window, so only the most recent value of a burst survives to
/// be [polled](Debounce::poll).
#[derive(Debug)]
pub struct Debounce<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    /// Create a debouncer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Debounce { window, pending: None }
    }

    /// The configured quiet window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a value is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule `value` to fire once the quiet window elapses, cancelling any
    /// previously pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.window, value));
    }

    /// Take the pending value if its window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((due, _)) if due <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Discard any pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }
}

/// A queue of single-shot tasks to run on the host's next frame, before
/// repaint.
#[derive(Debug)]
pub struct FrameQueue<T> {
    tasks: VecDeque<T>,
}

impl<T> FrameQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        FrameQueue { tasks: VecDeque::new() }
    }

    /// The number of queued tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether any tasks are queued.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Queue a task for the next frame.
    pub fn push(&mut self, task: T) {
        self.tasks.push_back(task);
    }

    /// Take everything queued so far, in order.
    ///
    /// Tasks queued while draining run on the following frame, matching how a
    /// host processes its frame callbacks.
    pub fn drain(&mut self) -> VecDeque<T> {
        std::mem::take(&mut self.tasks)
    }
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        FrameQueue::new()
    }
}
