//! Undo/redo history built from explicit edit groups.
//!
//! The history never decides where a group ends on its own; the owning
//! buffer seals groups when a caller commits them. A group undoes and
//! redoes as one unit.

/// Maximum number of committed undo groups kept.
const MAX_UNDO_DEPTH: usize = 1000;

/// Direction of a reversible edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
}

/// A single reversible edit: `text` inserted or deleted at `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    pub kind: EditKind,
    pub position: usize,
    pub text: String,
}

impl EditOperation {
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert,
            position,
            text: text.into(),
        }
    }

    pub fn delete(position: usize, text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Delete,
            position,
            text: text.into(),
        }
    }

    /// Returns the operation that reverts this one.
    pub fn inverse(&self) -> EditOperation {
        EditOperation {
            kind: match self.kind {
                EditKind::Insert => EditKind::Delete,
                EditKind::Delete => EditKind::Insert,
            },
            position: self.position,
            text: self.text.clone(),
        }
    }
}

/// Manages undo/redo stacks of committed edit groups plus the group
/// currently being built.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Vec<EditOperation>>,
    redo_stack: Vec<Vec<EditOperation>>,
    pending: Vec<EditOperation>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation to the in-progress group.
    pub fn record(&mut self, op: EditOperation) {
        self.pending.push(op);
    }

    /// Seals the in-progress group onto the undo stack.
    ///
    /// Committing a non-empty group invalidates redo history. Returns
    /// false when nothing was pending.
    pub fn commit_group(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        self.undo_stack.push(std::mem::take(&mut self.pending));
        self.redo_stack.clear();
        while self.undo_stack.len() > MAX_UNDO_DEPTH {
            self.undo_stack.remove(0);
        }
        true
    }

    /// Pops the newest group and returns the operations that revert it,
    /// in application order. Pending edits are committed first.
    pub fn undo(&mut self) -> Option<Vec<EditOperation>> {
        self.commit_group();
        let group = self.undo_stack.pop()?;
        let ops = group.iter().rev().map(EditOperation::inverse).collect();
        self.redo_stack.push(group);
        Some(ops)
    }

    /// Pops the newest undone group and returns its operations for replay.
    pub fn redo(&mut self) -> Option<Vec<EditOperation>> {
        let group = self.redo_stack.pop()?;
        self.undo_stack.push(group.clone());
        Some(group)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || !self.pending.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of committed undo groups.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// True while recorded operations await a commit.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_flips_kind() {
        let op = EditOperation::insert(3, "abc");
        let inv = op.inverse();
        assert_eq!(inv.kind, EditKind::Delete);
        assert_eq!(inv.position, 3);
        assert_eq!(inv.text, "abc");
        assert_eq!(inv.inverse(), op);
    }

    #[test]
    fn test_undo_returns_inverse_ops_in_reverse_order() {
        let mut history = History::new();
        history.record(EditOperation::insert(0, "ab"));
        history.record(EditOperation::insert(2, "cd"));
        history.commit_group();

        let ops = history.undo().unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], EditOperation::delete(2, "cd"));
        assert_eq!(ops[1], EditOperation::delete(0, "ab"));
    }

    #[test]
    fn test_commit_empty_group_is_noop() {
        let mut history = History::new();
        assert!(!history.commit_group());
        assert_eq!(history.undo_depth(), 0);
    }

    #[test]
    fn test_redo_cleared_on_new_commit() {
        let mut history = History::new();
        history.record(EditOperation::insert(0, "a"));
        history.commit_group();
        history.undo();
        assert!(history.can_redo());

        history.record(EditOperation::insert(0, "b"));
        history.commit_group();
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_commits_pending_first() {
        let mut history = History::new();
        history.record(EditOperation::insert(0, "a"));

        let ops = history.undo().unwrap();
        assert_eq!(ops, vec![EditOperation::delete(0, "a")]);
        assert!(!history.has_pending());
    }
}
