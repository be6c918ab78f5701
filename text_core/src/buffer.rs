//! Text buffer implementation using ropey.

use crate::history::{EditKind, EditOperation, History};
use ropey::Rope;

/// A text buffer backed by a rope, with grouped undo history.
///
/// Every mutation is recorded into the currently open undo group; callers
/// decide group boundaries through [`TextBuffer::commit_undo_group`].
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    history: History,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer from a string.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            history: History::new(),
        }
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the character at the given index, if it exists.
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        if char_idx < self.len_chars() {
            Some(self.rope.char(char_idx))
        } else {
            None
        }
    }

    /// Returns the position one character past `char_idx`, clamped to the
    /// buffer length.
    pub fn char_next(&self, char_idx: usize) -> usize {
        (char_idx + 1).min(self.len_chars())
    }

    /// Returns the text between two character indices (end-exclusive).
    /// Out-of-range indices are clamped.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len_chars());
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Returns the whole buffer content as a string.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Inserts a string at the given character index, recording it in the
    /// open undo group.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
        self.history.record(EditOperation::insert(idx, text));
    }

    /// Removes text in the given character range, recording it in the open
    /// undo group.
    pub fn remove(&mut self, start: usize, end: usize) {
        let end = end.min(self.len_chars());
        let start = start.min(end);
        if start == end {
            return;
        }
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.history.record(EditOperation::delete(start, removed));
    }

    /// Seals the in-progress undo group so the next edit starts a new one.
    /// Safe to call with nothing pending.
    pub fn commit_undo_group(&mut self) {
        self.history.commit_group();
    }

    /// Number of committed undo groups.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Reverts the newest undo group. Returns false if there was nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(ops) => {
                for op in &ops {
                    self.apply(op);
                }
                true
            }
            None => false,
        }
    }

    /// Re-applies the newest undone group. Returns false if there was
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(ops) => {
                for op in &ops {
                    self.apply(op);
                }
                true
            }
            None => false,
        }
    }

    // Replays an operation on the rope without recording it.
    fn apply(&mut self, op: &EditOperation) {
        match op.kind {
            EditKind::Insert => self.rope.insert(op.position, &op.text),
            EditKind::Delete => {
                let end = op.position + op.text.chars().count();
                self.rope.remove(op.position..end);
            }
        }
    }
}
