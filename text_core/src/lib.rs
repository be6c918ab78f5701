//! Text storage core - rope-backed buffers with grouped undo.
//!
//! This crate knows about text, character positions and reversible edits,
//! and nothing about sessions, windows or rendering.

pub mod buffer;
pub mod history;
pub mod selection;

pub use buffer::TextBuffer;
pub use history::{EditKind, EditOperation, History};
pub use selection::SelectionRange;
