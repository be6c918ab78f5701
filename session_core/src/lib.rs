//! Session core - the per-session editing context and the subsystems it
//! owns.
//!
//! Commands reach the active buffer, window, selections and surrounding
//! session objects through [`Context`]. The context in turn owns the jump
//! history ([`JumpList`]) and the nested edit-transaction counter that
//! [`ScopedEdition`] brackets, so a burst of logical edits commits as a
//! single undo group.

pub mod buffers;
pub mod client;
pub mod context;
pub mod edition;
pub mod error;
pub mod jump;
pub mod registers;
pub mod scope;
pub mod selections;
pub mod window;

pub use buffers::{BufferId, BufferStore};
pub use client::{Client, InputRouter, UserInterface};
pub use context::{Context, ContextFlags};
pub use edition::ScopedEdition;
pub use error::{Component, ContextError, JumpDirection};
pub use jump::JumpList;
pub use registers::RegisterStore;
pub use scope::Scope;
pub use selections::SelectionSnapshot;
pub use window::{Window, WindowId, WindowStore};
