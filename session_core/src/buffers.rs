//! Session buffer registry.

use crate::scope::Scope;
use sable_text::TextBuffer;

/// Unique identifier for a buffer. Ids are never reused within a session.
pub type BufferId = usize;

#[derive(Debug)]
struct BufferEntry {
    buffer: TextBuffer,
    name: String,
    scope: Scope,
}

/// Owns every buffer of a session, addressed by [`BufferId`].
///
/// Closing a buffer invalidates jump entries referencing it: the id must
/// be announced to every live [`JumpList`](crate::jump::JumpList) via
/// `forget_buffer` before [`BufferStore::close`] is called.
#[derive(Debug, Default)]
pub struct BufferStore {
    entries: Vec<Option<BufferEntry>>,
    next_id: BufferId,
}

impl BufferStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer with the given display name and initial content,
    /// returning its id.
    pub fn create(&mut self, name: impl Into<String>, text: &str) -> BufferId {
        let id = self.next_id;
        self.next_id += 1;

        if id >= self.entries.len() {
            self.entries.resize_with(id + 1, || None);
        }
        let name = name.into();
        log::debug!("created buffer {id} ({name})");
        self.entries[id] = Some(BufferEntry {
            buffer: TextBuffer::from_str(text),
            name,
            scope: Scope::new(),
        });
        id
    }

    /// Returns the buffer with the given id, if it is still open.
    pub fn get(&self, id: BufferId) -> Option<&TextBuffer> {
        self.entries.get(id)?.as_ref().map(|entry| &entry.buffer)
    }

    /// Mutable access to the buffer with the given id.
    pub fn get_mut(&mut self, id: BufferId) -> Option<&mut TextBuffer> {
        self.entries
            .get_mut(id)?
            .as_mut()
            .map(|entry| &mut entry.buffer)
    }

    pub fn contains(&self, id: BufferId) -> bool {
        self.entries.get(id).is_some_and(Option::is_some)
    }

    /// The buffer's display name.
    pub fn name(&self, id: BufferId) -> Option<&str> {
        self.entries
            .get(id)?
            .as_ref()
            .map(|entry| entry.name.as_str())
    }

    /// The buffer-local option scope.
    pub fn scope(&self, id: BufferId) -> Option<&Scope> {
        self.entries.get(id)?.as_ref().map(|entry| &entry.scope)
    }

    pub fn scope_mut(&mut self, id: BufferId) -> Option<&mut Scope> {
        self.entries
            .get_mut(id)?
            .as_mut()
            .map(|entry| &mut entry.scope)
    }

    /// Removes a buffer. Returns true if it existed.
    ///
    /// Every live jump list must have been told to `forget_buffer(id)`
    /// before this; a jump resolving a closed buffer panics.
    pub fn close(&mut self, id: BufferId) -> bool {
        match self.entries.get_mut(id) {
            Some(slot) if slot.is_some() => {
                log::debug!("closed buffer {id}");
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Ids of all open buffers, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = BufferId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(id, entry)| entry.as_ref().map(|_| id))
    }

    /// Number of open buffers.
    pub fn buffer_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let mut buffers = BufferStore::new();
        let id = buffers.create("scratch", "hello");

        assert!(buffers.contains(id));
        assert_eq!(buffers.name(id), Some("scratch"));
        assert_eq!(buffers.get(id).unwrap().text(), "hello");
        assert_eq!(buffers.buffer_count(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_close() {
        let mut buffers = BufferStore::new();
        let first = buffers.create("a", "");
        assert!(buffers.close(first));
        assert!(!buffers.close(first));

        let second = buffers.create("b", "");
        assert_ne!(first, second);
        assert!(!buffers.contains(first));
        assert!(buffers.contains(second));
    }

    #[test]
    fn test_buffer_scope_is_per_buffer() {
        let mut buffers = BufferStore::new();
        let a = buffers.create("a", "");
        let b = buffers.create("b", "");

        buffers.scope_mut(a).unwrap().set_option("tabstop", "2");
        assert_eq!(buffers.scope(a).unwrap().option("tabstop"), Some("2"));
        assert!(buffers.scope(b).unwrap().option("tabstop").is_none());
    }

    #[test]
    fn test_ids_iterates_open_buffers() {
        let mut buffers = BufferStore::new();
        let a = buffers.create("a", "");
        let b = buffers.create("b", "");
        let c = buffers.create("c", "");
        buffers.close(b);

        let ids: Vec<_> = buffers.ids().collect();
        assert_eq!(ids, vec![a, c]);
    }
}
