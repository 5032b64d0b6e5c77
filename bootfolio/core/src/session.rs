//! Shell Session
//!
//! The simulated terminal: input line, command registry and history buffer
//! wired together, plus the scroll-back view model a surface renders.
//!
//! # Key Handling
//!
//! | Key           | Effect                                                  |
//! |---------------|---------------------------------------------------------|
//! | `Char`        | append; recall cursor is left where it was               |
//! | `Backspace`   | delete last character                                   |
//! | `Submit`      | lookup, then append / clear; blank input only resets    |
//! | `RecallOlder` | buffer ← previous history input                         |
//! | `RecallNewer` | buffer ← next history input (or empty past the newest)  |
//! | `Complete`    | replace buffer when exactly one command matches         |
//! | `Interrupt`   | empty buffer, typing indicator off, history untouched   |

use crate::history::{CommandEntry, HistoryBuffer};
use crate::input::{InputLine, KeyInput};
use crate::profile::Profile;
use crate::registry::{CommandContext, CommandRegistry, SideEffect};

/// Default prompt shown before each command
pub const DEFAULT_PROMPT: &str = "user@portfolio:~$";

/// What a key press did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The buffer changed
    Edited,
    /// Nothing changed
    Unchanged,
    /// Blank submit; buffer reset, no entry
    Blank,
    /// An entry was appended at `index`
    Appended {
        /// Index of the new entry
        index: usize,
        /// Side effect the command requested
        effect: SideEffect,
    },
    /// History was emptied
    Cleared,
    /// Line abandoned
    Interrupted,
}

/// One renderable row of the scroll-back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollLine<'a> {
    /// Welcome text above all commands
    Banner(&'a str),
    /// A submitted command, echoed after the prompt
    Command {
        /// Prompt text
        prompt: &'a str,
        /// Input as submitted
        input: &'a str,
    },
    /// A line of command output (may carry markup)
    Output(&'a str),
}

/// The simulated terminal session
#[derive(Debug)]
pub struct ShellSession {
    registry: CommandRegistry,
    history: HistoryBuffer,
    line: InputLine,
    prompt: String,
    welcome: Vec<String>,
}

impl ShellSession {
    /// Create a session from explicit parts
    pub fn new(registry: CommandRegistry, prompt: impl Into<String>, welcome: Vec<String>) -> Self {
        Self {
            registry,
            history: HistoryBuffer::new(),
            line: InputLine::new(),
            prompt: prompt.into(),
            welcome,
        }
    }

    /// Create a session with the built-in commands for `profile`
    pub fn from_profile(profile: &Profile, prompt: impl Into<String>) -> Self {
        Self::new(
            CommandRegistry::builtin(profile),
            prompt,
            profile.identity.welcome.clone(),
        )
    }

    /// Apply one key
    pub fn handle_key(&mut self, key: KeyInput) -> KeyOutcome {
        match key {
            KeyInput::Char(c) => {
                self.line.push(c);
                KeyOutcome::Edited
            }
            KeyInput::Backspace => match self.line.pop() {
                Some(_) => KeyOutcome::Edited,
                None => KeyOutcome::Unchanged,
            },
            KeyInput::Submit => self.submit(),
            KeyInput::RecallOlder => {
                let recalled = self.history.recall_previous().map(str::to_owned);
                self.apply_recall(recalled)
            }
            KeyInput::RecallNewer => {
                let recalled = self.history.recall_next().map(str::to_owned);
                self.apply_recall(recalled)
            }
            KeyInput::Complete => self.complete(),
            KeyInput::Interrupt => {
                self.line.reset();
                KeyOutcome::Interrupted
            }
        }
    }

    fn submit(&mut self) -> KeyOutcome {
        let text = self.line.take();
        if text.trim().is_empty() {
            return KeyOutcome::Blank;
        }

        let result = self
            .registry
            .lookup(&text, &CommandContext::new(&self.history));

        let outcome = if result.effect == SideEffect::ClearHistory {
            self.history.clear();
            KeyOutcome::Cleared
        } else {
            self.history.append(CommandEntry::new(text, result.lines));
            self.history.reset_cursor();
            KeyOutcome::Appended {
                index: self.history.len() - 1,
                effect: result.effect,
            }
        };

        tracing::debug!(outcome = ?outcome, entries = self.history.len(), "Command submitted");
        outcome
    }

    fn apply_recall(&mut self, recalled: Option<String>) -> KeyOutcome {
        match recalled {
            Some(text) => {
                self.line.replace(&text);
                KeyOutcome::Edited
            }
            None => KeyOutcome::Unchanged,
        }
    }

    fn complete(&mut self) -> KeyOutcome {
        let completion = match self.registry.completions(self.line.text()).as_slice() {
            [only] => (*only).to_string(),
            _ => return KeyOutcome::Unchanged,
        };
        if completion == self.line.text() {
            return KeyOutcome::Unchanged;
        }
        self.line.replace(&completion);
        KeyOutcome::Edited
    }

    /// Scroll-back rows, oldest first
    pub fn scrollback(&self) -> impl Iterator<Item = ScrollLine<'_>> {
        let banner = self
            .welcome
            .iter()
            .map(|l| ScrollLine::Banner(l.as_str()))
            .chain((!self.welcome.is_empty()).then_some(ScrollLine::Banner("")));

        let entries = self.history.entries().iter().flat_map(move |entry| {
            std::iter::once(ScrollLine::Command {
                prompt: self.prompt.as_str(),
                input: entry.input_text(),
            })
            .chain(entry.output_lines().iter().map(|l| ScrollLine::Output(l.as_str())))
        });

        banner.chain(entries)
    }

    /// Current uncommitted text
    #[must_use]
    pub fn input(&self) -> &str {
        self.line.text()
    }

    /// Whether the typing indicator is on
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.line.is_typing()
    }

    /// Prompt text
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Command history
    #[must_use]
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Command registry
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}
