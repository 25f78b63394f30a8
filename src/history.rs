//! Drawing history — the shared linear undo/redo log.
//!
//! DESIGN
//! ======
//! One process-wide log of opaque draw actions with a cursor marking the last
//! applied entry. Undo/redo move the cursor; a new action written while the
//! cursor sits before the end truncates the redone-out future first. The log
//! replayed from the start to the cursor is the entire reconstructable canvas
//! state, so late joiners only need the replay slice — peers that were present
//! already hold the strokes and only need play/unplay signals.
//!
//! The payloads are never inspected: the engine stores and replays whatever
//! JSON value the drawing peer produced.

use serde_json::Value;

/// Linear undo/redo log over opaque draw actions.
///
/// Invariant: `-1 <= cursor <= log.len() - 1`, with `-1` meaning "nothing
/// applied" (empty canvas).
#[derive(Debug)]
pub struct DrawHistory {
    log: Vec<Value>,
    cursor: isize,
}

impl Default for DrawHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawHistory {
    #[must_use]
    pub fn new() -> Self {
        Self { log: Vec::new(), cursor: -1 }
    }

    /// Append a draw action, discarding any undone future first.
    pub fn push(&mut self, action: Value) {
        let len = isize::try_from(self.log.len()).unwrap_or(isize::MAX);
        if self.cursor < len - 1 {
            self.log.truncate(usize::try_from(self.cursor + 1).unwrap_or(0));
        }
        self.log.push(action);
        self.cursor = isize::try_from(self.log.len()).unwrap_or(isize::MAX) - 1;
    }

    /// Undo is legal only while the cursor is past the first entry: the very
    /// first action can never be undone. Matches the deployed behavior; see
    /// DESIGN.md before changing the bound.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < isize::try_from(self.log.len()).unwrap_or(isize::MAX) - 1
    }

    /// Move the cursor back one entry. Returns `false` (and leaves the log
    /// untouched) when the transition is illegal.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move the cursor forward one entry. Returns `false` when at the end.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Drop every action and reset the cursor.
    pub fn clear(&mut self) {
        self.log.clear();
        self.cursor = -1;
    }

    /// The currently applied actions, oldest first. Empty when the cursor is
    /// at `-1`. This is what a newly-joining peer replays.
    #[must_use]
    pub fn replay(&self) -> &[Value] {
        let end = usize::try_from(self.cursor + 1).unwrap_or(0);
        &self.log[..end]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> isize {
        self.cursor
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
