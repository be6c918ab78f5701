//! Collaborator traits for the objects a context does not own.

use crate::buffers::{BufferId, BufferStore};
use crate::selections::SelectionSnapshot;

/// Rendering surface owned by a client.
pub trait UserInterface {
    /// Displays a status line.
    fn draw_status(&mut self, line: &str);
}

/// A connected client: owns a user interface and the cross-buffer window
/// management for its session.
pub trait Client {
    /// Shows a status message to the user.
    fn print_status(&mut self, line: &str);

    /// Switches the client's window over to `buffer` and returns the
    /// selections the context should adopt there.
    fn change_buffer(&mut self, buffer: BufferId, buffers: &BufferStore) -> SelectionSnapshot;

    /// The client's rendering surface.
    fn ui(&mut self) -> &mut dyn UserInterface;
}

/// Input-mode dispatch for a session.
pub trait InputRouter {
    /// Abandons any in-progress input state and returns to the default
    /// mode.
    fn reset_to_default_mode(&mut self);
}
