//! Recoverable error conditions surfaced to command dispatch.
//!
//! Structural misuse (rebinding a client, unbalanced editions, window and
//! buffer disagreeing) panics instead; see the individual methods on
//! [`Context`](crate::context::Context).

use std::fmt;

use thiserror::Error;

/// A context component an accessor may find missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Buffer,
    Window,
    InputRouter,
    Client,
    UserInterface,
    Selections,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Component::Buffer => "buffer",
            Component::Window => "window",
            Component::InputRouter => "input router",
            Component::Client => "client",
            Component::UserInterface => "user interface",
            Component::Selections => "selections",
        })
    }
}

/// Direction of a jump traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpDirection {
    Forward,
    Backward,
}

impl fmt::Display for JumpDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JumpDirection::Forward => "next",
            JumpDirection::Backward => "previous",
        })
    }
}

/// Failures commands are expected to catch and surface as a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// An accessor was invoked on a context lacking the component.
    #[error("no {0} in context")]
    MissingComponent(Component),
    /// Jump history is exhausted in the requested direction.
    #[error("no {0} jump")]
    NavigationExhausted(JumpDirection),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ContextError::MissingComponent(Component::Buffer).to_string(),
            "no buffer in context"
        );
        assert_eq!(
            ContextError::MissingComponent(Component::InputRouter).to_string(),
            "no input router in context"
        );
        assert_eq!(
            ContextError::NavigationExhausted(JumpDirection::Forward).to_string(),
            "no next jump"
        );
        assert_eq!(
            ContextError::NavigationExhausted(JumpDirection::Backward).to_string(),
            "no previous jump"
        );
    }
}
