//! Window collaborator: the buffer a window displays plus window-local
//! options. Viewport and rendering state live in the UI layer.

use crate::buffers::BufferId;
use crate::scope::Scope;

/// Unique identifier for a window. Ids are never reused within a session.
pub type WindowId = usize;

/// A window bound to one buffer.
#[derive(Debug, Clone)]
pub struct Window {
    buffer: BufferId,
    scope: Scope,
}

impl Window {
    pub fn new(buffer: BufferId) -> Self {
        Self {
            buffer,
            scope: Scope::new(),
        }
    }

    /// The buffer this window displays.
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    /// The window-local option scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }
}

/// Owns the windows of a session, addressed by [`WindowId`].
#[derive(Debug, Default)]
pub struct WindowStore {
    windows: Vec<Option<Window>>,
    next_id: WindowId,
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a window displaying `buffer`, returning its id.
    pub fn create(&mut self, buffer: BufferId) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;

        if id >= self.windows.len() {
            self.windows.resize_with(id + 1, || None);
        }
        self.windows[id] = Some(Window::new(buffer));
        id
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)?.as_ref()
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(id)?.as_mut()
    }

    /// Removes a window. Returns true if it existed.
    pub fn close(&mut self, id: WindowId) -> bool {
        match self.windows.get_mut(id) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_close() {
        let mut windows = WindowStore::new();
        let id = windows.create(7);

        assert_eq!(windows.get(id).unwrap().buffer(), 7);
        assert!(windows.close(id));
        assert!(windows.get(id).is_none());
        assert!(!windows.close(id));
    }

    #[test]
    fn test_window_scope() {
        let mut windows = WindowStore::new();
        let id = windows.create(0);
        windows
            .get_mut(id)
            .unwrap()
            .scope_mut()
            .set_option("number", "true");
        assert_eq!(windows.get(id).unwrap().scope().option("number"), Some("true"));
    }
}
