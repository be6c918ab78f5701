//! The per-session editing context.

use bitflags::bitflags;

use crate::buffers::{BufferId, BufferStore};
use crate::client::{Client, InputRouter, UserInterface};
use crate::error::{Component, ContextError};
use crate::jump::JumpList;
use crate::registers::RegisterStore;
use crate::scope::Scope;
use crate::selections::SelectionSnapshot;
use crate::window::{WindowId, WindowStore};

bitflags! {
    /// Session attributes of a context.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ContextFlags: u8 {
        /// Throwaway context used for speculative evaluation; its edits
        /// never produce undo commits.
        const DRAFT = 1;
    }
}

/// The object through which commands reach the active buffer, window,
/// selections and surrounding session objects.
///
/// A context owns its selection snapshot, its jump list and its edition
/// counter. The window, client and input router belong to the session
/// layer: the window is referenced by id, the client is bound exactly
/// once, and the input router is fixed at construction.
pub struct Context {
    selections: Option<SelectionSnapshot>,
    window: Option<WindowId>,
    input_router: Option<Box<dyn InputRouter>>,
    client: Option<Box<dyn Client>>,
    name: String,
    flags: ContextFlags,
    edition_level: i32,
    jump_list: JumpList,
}

impl Context {
    /// Creates a context holding initial selections. The input router, if
    /// any, is fixed for the context's lifetime.
    pub fn new(
        input_router: Option<Box<dyn InputRouter>>,
        selections: SelectionSnapshot,
        flags: ContextFlags,
        name: impl Into<String>,
    ) -> Self {
        Self {
            selections: Some(selections),
            window: None,
            input_router,
            client: None,
            name: name.into(),
            flags,
            edition_level: if flags.contains(ContextFlags::DRAFT) { -1 } else { 0 },
            jump_list: JumpList::new(),
        }
    }

    /// Creates a bare context holding no buffer, window or client.
    pub fn bare() -> Self {
        Self {
            selections: None,
            window: None,
            input_router: None,
            client: None,
            name: String::new(),
            flags: ContextFlags::empty(),
            edition_level: 0,
            jump_list: JumpList::new(),
        }
    }

    pub fn has_buffer(&self) -> bool {
        self.selections.is_some()
    }

    pub fn has_window(&self) -> bool {
        self.window.is_some()
    }

    pub fn has_input_router(&self) -> bool {
        self.input_router.is_some()
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub fn has_ui(&self) -> bool {
        self.has_client()
    }

    /// The buffer the selections live in.
    pub fn buffer(&self) -> Result<BufferId, ContextError> {
        self.selections
            .as_ref()
            .map(|snapshot| snapshot.buffer())
            .ok_or(ContextError::MissingComponent(Component::Buffer))
    }

    /// The window bound to this context.
    pub fn window(&self) -> Result<WindowId, ContextError> {
        self.window
            .ok_or(ContextError::MissingComponent(Component::Window))
    }

    /// The input router driving this context.
    pub fn input_router_mut(&mut self) -> Result<&mut dyn InputRouter, ContextError> {
        match self.input_router.as_deref_mut() {
            Some(router) => Ok(router),
            None => Err(ContextError::MissingComponent(Component::InputRouter)),
        }
    }

    /// The client connected to this context.
    pub fn client(&self) -> Result<&dyn Client, ContextError> {
        match self.client.as_deref() {
            Some(client) => Ok(client),
            None => Err(ContextError::MissingComponent(Component::Client)),
        }
    }

    pub fn client_mut(&mut self) -> Result<&mut dyn Client, ContextError> {
        match self.client.as_deref_mut() {
            Some(client) => Ok(client),
            None => Err(ContextError::MissingComponent(Component::Client)),
        }
    }

    /// The user interface, reached through the client.
    pub fn ui(&mut self) -> Result<&mut dyn UserInterface, ContextError> {
        match self.client.as_deref_mut() {
            Some(client) => Ok(client.ui()),
            None => Err(ContextError::MissingComponent(Component::UserInterface)),
        }
    }

    /// Resolves the most specific option scope currently bound: window
    /// scope, then buffer scope, then the global scope. Commands depend on
    /// this order.
    pub fn scope<'a>(
        &self,
        windows: &'a WindowStore,
        buffers: &'a BufferStore,
        global: &'a Scope,
    ) -> &'a Scope {
        if let Some(id) = self.window {
            let window = windows
                .get(id)
                .unwrap_or_else(|| panic!("context window {id} is not registered"));
            return window.scope();
        }
        if let Some(snapshot) = &self.selections {
            let id = snapshot.buffer();
            return buffers
                .scope(id)
                .unwrap_or_else(|| panic!("context buffer {id} is not registered"));
        }
        global
    }

    /// Binds the client. A context accepts a client exactly once;
    /// rebinding is a caller bug.
    pub fn set_client(&mut self, client: Box<dyn Client>) {
        assert!(self.client.is_none(), "context already has a client");
        self.client = Some(client);
    }

    /// Binds a window. The window must display the context's current
    /// buffer; anything else is a caller bug.
    pub fn set_window(&mut self, window: WindowId, windows: &WindowStore) {
        let bound = windows
            .get(window)
            .unwrap_or_else(|| panic!("window {window} is not registered"))
            .buffer();
        let current = self
            .buffer()
            .unwrap_or_else(|_| panic!("cannot bind a window to a context without a buffer"));
        assert_eq!(
            bound, current,
            "window displays buffer {bound}, context is on buffer {current}"
        );
        self.window = Some(window);
    }

    /// Shows a status message through the client. Best-effort: a headless
    /// context silently drops it.
    pub fn print_status(&mut self, line: &str) {
        match self.client.as_deref_mut() {
            Some(client) => client.print_status(line),
            None => log::trace!("status dropped (no client): {line}"),
        }
    }

    /// Moves the context onto another buffer. No-op when already there.
    ///
    /// An open edition's in-flight edits are committed to the old buffer
    /// first. The window binding is dropped, the client (when bound)
    /// places the new selections, and the input router falls back to its
    /// default mode.
    pub fn change_buffer(
        &mut self,
        new_buffer: BufferId,
        buffers: &mut BufferStore,
    ) -> Result<(), ContextError> {
        let current = self.buffer()?;
        if current == new_buffer {
            return Ok(());
        }
        assert!(
            buffers.contains(new_buffer),
            "buffer {new_buffer} is not registered"
        );

        if self.edition_level > 0 {
            if let Some(buffer) = buffers.get_mut(current) {
                buffer.commit_undo_group();
            }
        }

        log::debug!(
            "context '{}' moving from buffer {current} to {new_buffer}",
            self.name
        );
        self.window = None;
        self.selections = Some(match self.client.as_deref_mut() {
            Some(client) => {
                let snapshot = client.change_buffer(new_buffer, buffers);
                debug_assert_eq!(snapshot.buffer(), new_buffer);
                snapshot
            }
            None => SelectionSnapshot::bare(new_buffer),
        });
        if let Some(router) = self.input_router.as_deref_mut() {
            router.reset_to_default_mode();
        }
        Ok(())
    }

    /// The current selections, re-validated against the buffer content
    /// (edits since last access may have left them stale).
    pub fn selections(
        &mut self,
        buffers: &BufferStore,
    ) -> Result<&SelectionSnapshot, ContextError> {
        self.selections_mut(buffers).map(|snapshot| &*snapshot)
    }

    /// Mutable access to the current selections, re-validated first.
    pub fn selections_mut(
        &mut self,
        buffers: &BufferStore,
    ) -> Result<&mut SelectionSnapshot, ContextError> {
        let snapshot = self
            .selections
            .as_mut()
            .ok_or(ContextError::MissingComponent(Component::Selections))?;
        let id = snapshot.buffer();
        let buffer = buffers
            .get(id)
            .unwrap_or_else(|| panic!("context buffer {id} is not registered"));
        snapshot.update(buffer);
        Ok(snapshot)
    }

    /// The selections without re-validation, for callers about to
    /// overwrite them wholesale.
    pub fn selections_write_only(&mut self) -> Result<&mut SelectionSnapshot, ContextError> {
        self.selections
            .as_mut()
            .ok_or(ContextError::MissingComponent(Component::Selections))
    }

    /// Installs a snapshot wholesale. With a window bound, the snapshot
    /// must stay on the window's buffer; cross-buffer moves go through
    /// [`Context::change_buffer`].
    pub fn set_selections(&mut self, snapshot: SelectionSnapshot) {
        if self.window.is_some() {
            let current = self
                .buffer()
                .expect("a context with a window always has selections");
            assert_eq!(
                snapshot.buffer(),
                current,
                "selections would leave the window's buffer behind"
            );
        }
        self.selections = Some(snapshot);
    }

    /// Extracts the text under each selection, min to max inclusive, one
    /// string per range in selection order.
    pub fn selections_content(
        &mut self,
        buffers: &BufferStore,
    ) -> Result<Vec<String>, ContextError> {
        let snapshot = self.selections_mut(buffers)?;
        let id = snapshot.buffer();
        let buffer = buffers
            .get(id)
            .unwrap_or_else(|| panic!("context buffer {id} is not registered"));
        Ok(snapshot.extract_content(buffer))
    }

    /// Opens a nested edit transaction. No-op when grouping is disabled
    /// for this context.
    pub fn begin_edition(&mut self) {
        if self.edition_level >= 0 {
            self.edition_level += 1;
        }
    }

    /// Closes a nested edit transaction. The outermost close commits the
    /// current buffer's undo group, so a fully balanced bracket commits
    /// exactly once regardless of nesting depth.
    ///
    /// Panics when no edition is open; unbalanced brackets are a caller
    /// bug.
    pub fn end_edition(&mut self, buffers: &mut BufferStore) -> Result<(), ContextError> {
        if self.edition_level < 0 {
            return Ok(());
        }
        assert!(
            self.edition_level != 0,
            "end_edition without a matching begin_edition"
        );
        if self.edition_level == 1 {
            let id = self.buffer()?;
            let buffer = buffers
                .get_mut(id)
                .unwrap_or_else(|| panic!("context buffer {id} is not registered"));
            buffer.commit_undo_group();
        }
        self.edition_level -= 1;
        Ok(())
    }

    /// True while an edit transaction is open.
    pub fn is_editing(&self) -> bool {
        self.edition_level > 0
    }

    /// The register value addressed by the main selection: the entry at
    /// the main selection's index, clamped to the register's last value.
    /// None only when the register holds no values at all.
    pub fn main_sel_register_value<'a>(
        &self,
        registers: &'a RegisterStore,
        register: char,
    ) -> Option<&'a str> {
        let values = registers.values(register);
        if values.is_empty() {
            return None;
        }
        let index = self
            .selections
            .as_ref()
            .map_or(0, |snapshot| snapshot.main_index());
        Some(values[index.min(values.len() - 1)].as_str())
    }

    /// The jump history this context owns.
    pub fn jump_list(&self) -> &JumpList {
        &self.jump_list
    }

    pub fn jump_list_mut(&mut self) -> &mut JumpList {
        &mut self.jump_list
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn flags(&self) -> ContextFlags {
        self.flags
    }
}
