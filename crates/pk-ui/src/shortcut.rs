// SPDX-License-Identifier: MIT
//
// Key → command table.
//
// Keys are the names produced by `pk_term::input::KeyEvent::name` ("q",
// "KEY_LEFT", "\n", …). A binding is either the built-in quit or a user
// command. Commands get the key that triggered them and a `Context` with
// access to the surface, the element list and the color registry.

use std::collections::HashMap;
use std::fmt;

use crate::app::Context;

/// Something that runs when its key is pressed.
///
/// Implemented for every `FnMut(&str, &mut Context) -> anyhow::Result<()>`.
pub trait Command {
    /// # Errors
    ///
    /// Any error is shown on the status line; the loop keeps running.
    fn execute(&mut self, key: &str, ctx: &mut Context<'_>) -> anyhow::Result<()>;
}

impl<F> Command for F
where
    F: FnMut(&str, &mut Context<'_>) -> anyhow::Result<()>,
{
    fn execute(&mut self, key: &str, ctx: &mut Context<'_>) -> anyhow::Result<()> {
        self(key, ctx)
    }
}

/// What a key is bound to.
pub enum Binding {
    /// Leave the loop (after confirmation, if configured).
    Quit,
    Command(Box<dyn Command>),
}

impl Binding {
    #[must_use]
    pub const fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => f.write_str("Quit"),
            Self::Command(_) => f.write_str("Command(..)"),
        }
    }
}

/// The quit key bound by default.
pub const QUIT_KEY: &str = "q";

/// Shortcut table. Starts with `q` bound to [`Binding::Quit`].
#[derive(Debug)]
pub struct Shortcuts {
    bindings: HashMap<String, Binding>,
}

impl Shortcuts {
    #[must_use]
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(QUIT_KEY.to_owned(), Binding::Quit);
        Self { bindings }
    }

    /// Bind `key`, replacing any previous binding.
    pub fn bind(&mut self, key: impl Into<String>, binding: Binding) {
        let key = key.into();
        tracing::debug!(key = %key.escape_debug(), ?binding, "shortcut bound");
        self.bindings.insert(key, binding);
    }

    /// Bind `key` to a command.
    pub fn bind_command(&mut self, key: impl Into<String>, command: impl Command + 'static) {
        self.bind(key, Binding::Command(Box::new(command)));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Binding> {
        self.bindings.get_mut(key)
    }

    #[must_use]
    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn unbind(&mut self, key: &str) -> Option<Binding> {
        self.bindings.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
