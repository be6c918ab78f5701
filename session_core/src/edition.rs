//! Scoped edit transactions.

use crate::buffers::BufferStore;
use crate::context::Context;

/// RAII bracket around a group of edits.
///
/// Acquiring the guard opens an edition on the context; dropping it closes
/// the edition on every exit path, so a command that bails out early still
/// gets exactly one undo-group commit at the outermost close. Nested
/// guards compose the same way nested `begin_edition`/`end_edition` pairs
/// do.
pub struct ScopedEdition<'a> {
    context: &'a mut Context,
    buffers: &'a mut BufferStore,
}

impl<'a> ScopedEdition<'a> {
    pub fn new(context: &'a mut Context, buffers: &'a mut BufferStore) -> Self {
        context.begin_edition();
        Self { context, buffers }
    }

    pub fn context(&mut self) -> &mut Context {
        self.context
    }

    pub fn buffers(&mut self) -> &mut BufferStore {
        self.buffers
    }

    /// Both borrows at once, for handing down to nested calls.
    pub fn parts(&mut self) -> (&mut Context, &mut BufferStore) {
        (self.context, self.buffers)
    }
}

impl Drop for ScopedEdition<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.context.end_edition(self.buffers) {
            log::warn!("edition closed on a context without a buffer: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, ContextFlags};
    use crate::selections::SelectionSnapshot;

    fn context_on_new_buffer() -> (Context, BufferStore, usize) {
        let mut buffers = BufferStore::new();
        let id = buffers.create("scratch", "hello");
        let context = Context::new(
            None,
            SelectionSnapshot::bare(id),
            ContextFlags::empty(),
            "test",
        );
        (context, buffers, id)
    }

    #[test]
    fn test_guard_commits_on_drop() {
        let (mut context, mut buffers, id) = context_on_new_buffer();
        {
            let mut edition = ScopedEdition::new(&mut context, &mut buffers);
            edition.buffers().get_mut(id).unwrap().insert(0, "x");
            assert!(edition.context().is_editing());
        }
        assert!(!context.is_editing());
        assert_eq!(buffers.get(id).unwrap().undo_depth(), 1);
    }

    #[test]
    fn test_nested_guards_commit_once() {
        fn inner(context: &mut Context, buffers: &mut BufferStore, id: usize) {
            let mut edition = ScopedEdition::new(context, buffers);
            edition.buffers().get_mut(id).unwrap().insert(0, "y");
        }

        let (mut context, mut buffers, id) = context_on_new_buffer();
        {
            let mut edition = ScopedEdition::new(&mut context, &mut buffers);
            edition.buffers().get_mut(id).unwrap().insert(0, "x");
            let (context, buffers) = edition.parts();
            inner(context, buffers, id);
            // The inner close must not have committed anything yet.
            assert_eq!(buffers.get(id).unwrap().undo_depth(), 0);
        }
        assert_eq!(buffers.get(id).unwrap().undo_depth(), 1);
    }

    #[test]
    fn test_guard_commits_on_early_exit() {
        fn failing_command(
            context: &mut Context,
            buffers: &mut BufferStore,
            id: usize,
        ) -> Result<(), &'static str> {
            let mut edition = ScopedEdition::new(context, buffers);
            edition.buffers().get_mut(id).unwrap().insert(0, "x");
            Err("command failed")
        }

        let (mut context, mut buffers, id) = context_on_new_buffer();
        assert!(failing_command(&mut context, &mut buffers, id).is_err());
        assert!(!context.is_editing());
        assert_eq!(buffers.get(id).unwrap().undo_depth(), 1);
    }

    #[test]
    fn test_guard_on_draft_context_commits_nothing() {
        let mut buffers = BufferStore::new();
        let id = buffers.create("scratch", "hello");
        let mut context = Context::new(
            None,
            SelectionSnapshot::bare(id),
            ContextFlags::DRAFT,
            "draft",
        );
        {
            let mut edition = ScopedEdition::new(&mut context, &mut buffers);
            edition.buffers().get_mut(id).unwrap().insert(0, "x");
        }
        assert_eq!(buffers.get(id).unwrap().undo_depth(), 0);
    }
}
