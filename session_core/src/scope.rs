//! Option namespaces resolved per window, buffer or session.

use std::collections::HashMap;

/// A flat option namespace.
///
/// Layering happens in [`Context::scope`](crate::context::Context::scope),
/// which picks the most specific namespace currently bound; a `Scope`
/// itself is just a keyed map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    options: HashMap<String, String>,
}

impl Scope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an option value.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Sets an option, replacing any previous value.
    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.options.insert(name.into(), value.into());
    }

    /// Removes an option. Returns true if it was set.
    pub fn unset_option(&mut self, name: &str) -> bool {
        self.options.remove(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
