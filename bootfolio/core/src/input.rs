//! Input Line
//!
//! The uncommitted text at the shell prompt and the key vocabulary that
//! drives it. How keys act on history and the registry is decided by
//! [`crate::session::ShellSession`]; this module only owns the buffer.

use serde::{Deserialize, Serialize};

/// Keys the shell understands
///
/// Anything a surface does not map to one of the named keys should arrive
/// as [`KeyInput::Char`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyInput {
    /// Ordinary text
    Char(char),
    /// Delete the last character
    Backspace,
    /// Commit the line
    Submit,
    /// Recall an older entry
    RecallOlder,
    /// Recall a newer entry
    RecallNewer,
    /// Complete a command name
    Complete,
    /// Abandon the line
    Interrupt,
}

/// Text being typed at the prompt
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputLine {
    buffer: String,
    /// Set while the user is actively editing
    typing: bool,
}

impl InputLine {
    /// Create an empty line
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Whether nothing is typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether the typing indicator is on
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Append a character
    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
        self.typing = true;
    }

    /// Remove the last character
    pub fn pop(&mut self) -> Option<char> {
        let popped = self.buffer.pop();
        self.typing = !self.buffer.is_empty();
        popped
    }

    /// Replace the whole text (history recall, completion)
    pub fn replace(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
    }

    /// Take the text, leaving the line empty
    pub fn take(&mut self) -> String {
        self.typing = false;
        std::mem::take(&mut self.buffer)
    }

    /// Empty the line and drop the typing indicator
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.typing = false;
    }
}
