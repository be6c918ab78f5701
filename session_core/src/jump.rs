//! Jump history: an ordered log of selection snapshots with a movable
//! cursor.

use crate::buffers::{BufferId, BufferStore};
use crate::error::{ContextError, JumpDirection};
use crate::selections::SelectionSnapshot;
use sable_text::TextBuffer;

/// Back/forward navigation over recorded selection states, possibly
/// spanning many buffers.
///
/// The cursor is an index into the log; `jumps.len()` is the past-end
/// sentinel meaning "no active jump, at head". Pushing truncates forward
/// history beyond the cursor and deduplicates, so re-visiting a past
/// state moves it to the tail instead of duplicating it. The first
/// backward step away from the head records the caller's live state, so a
/// later forward step can return there.
#[derive(Debug, Default)]
pub struct JumpList {
    jumps: Vec<SelectionSnapshot>,
    cursor: usize,
}

impl JumpList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot at the tail and resets the cursor to the head.
    pub fn push(&mut self, snapshot: SelectionSnapshot) {
        if self.cursor < self.jumps.len() {
            self.jumps.truncate(self.cursor + 1);
        }
        self.jumps.retain(|jump| *jump != snapshot);
        self.jumps.push(snapshot);
        self.cursor = self.jumps.len();
    }

    /// Removes the newest entry, if any, and resets the cursor to the
    /// head.
    pub fn drop_last(&mut self) {
        self.jumps.pop();
        self.cursor = self.jumps.len();
    }

    /// Moves one entry forward in the log, re-validating the entry before
    /// returning it. Fails when no jump lies ahead of the cursor.
    pub fn forward(&mut self, buffers: &BufferStore) -> Result<&SelectionSnapshot, ContextError> {
        if self.cursor + 1 < self.jumps.len() {
            self.cursor += 1;
            Ok(self.revalidate(self.cursor, buffers))
        } else {
            Err(ContextError::NavigationExhausted(JumpDirection::Forward))
        }
    }

    /// Moves one entry backward in the log.
    ///
    /// When the cursor sits on an entry that no longer matches `current`,
    /// the live state is recorded first: stale forward history is
    /// truncated and `current` becomes the new branch point the cursor
    /// lands on. When leaving the head, `current` is recorded so a later
    /// [`JumpList::forward`] can return to it. Fails when nothing lies
    /// behind the oldest recorded jump.
    pub fn backward(
        &mut self,
        current: SelectionSnapshot,
        buffers: &BufferStore,
    ) -> Result<&SelectionSnapshot, ContextError> {
        if self.cursor < self.jumps.len() && self.jumps[self.cursor] != current {
            self.push(current);
            self.cursor -= 1;
            return Ok(self.revalidate(self.cursor, buffers));
        }
        if self.cursor > 0 {
            if self.cursor == self.jumps.len() {
                self.push(current);
                self.cursor -= 1;
                if self.cursor == 0 {
                    return Err(ContextError::NavigationExhausted(JumpDirection::Backward));
                }
            }
            self.cursor -= 1;
            Ok(self.revalidate(self.cursor, buffers))
        } else {
            Err(ContextError::NavigationExhausted(JumpDirection::Backward))
        }
    }

    /// Drops every entry referencing `buffer`.
    ///
    /// The buffer-owning layer calls this before closing a buffer.
    /// Removals before the cursor shift it back one each; removing the
    /// cursor's own entry relocates the cursor to the log's new tail. The
    /// cursor never ends up referencing a removed entry.
    pub fn forget_buffer(&mut self, buffer: BufferId) {
        let mut removed = 0usize;
        let mut i = 0;
        while i < self.jumps.len() {
            if self.jumps[i].buffer() == buffer {
                let at_cursor = i == self.cursor;
                if i < self.cursor {
                    self.cursor -= 1;
                }
                self.jumps.remove(i);
                if at_cursor {
                    self.cursor = self.jumps.len().saturating_sub(1);
                }
                removed += 1;
            } else {
                i += 1;
            }
        }
        if removed > 0 {
            log::debug!("forgot {removed} jumps referencing buffer {buffer}");
        }
        debug_assert!(self.cursor <= self.jumps.len());
    }

    /// Recorded jumps, oldest first.
    pub fn entries(&self) -> &[SelectionSnapshot] {
        &self.jumps
    }

    /// The cursor's index, or None when no jump is active (at head).
    pub fn position(&self) -> Option<usize> {
        (self.cursor < self.jumps.len()).then_some(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.jumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jumps.is_empty()
    }

    fn revalidate(&mut self, index: usize, buffers: &BufferStore) -> &SelectionSnapshot {
        let id = self.jumps[index].buffer();
        self.jumps[index].update(live_buffer(buffers, id));
        &self.jumps[index]
    }
}

// A jump outliving its buffer means the owning layer closed the buffer
// without announcing it first; there is no sane recovery.
fn live_buffer(buffers: &BufferStore, id: BufferId) -> &TextBuffer {
    buffers
        .get(id)
        .unwrap_or_else(|| panic!("jump references closed buffer {id}"))
}
