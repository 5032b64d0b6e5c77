//! History Buffer
//!
//! Append-only record of submitted commands with a recall cursor for
//! walking back and forth through earlier inputs.
//!
//! # Design Philosophy
//!
//! Entries are immutable once appended. The buffer either grows by one entry
//! per submit or is reset to empty as a whole; nothing in between. The
//! recall cursor is the only mutable navigation state and it always points at
//! a valid entry when present.

use serde::{Deserialize, Serialize};

/// One executed command and its captured output
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Text exactly as submitted (not normalized)
    input_text: String,
    /// Output lines, possibly empty
    output_lines: Vec<String>,
    /// Local capture time (`HH:MM:SS`)
    timestamp: String,
}

impl CommandEntry {
    /// Create an entry stamped with the current local time
    pub fn new(input_text: impl Into<String>, output_lines: Vec<String>) -> Self {
        Self::with_timestamp(input_text, output_lines, current_timestamp())
    }

    /// Create an entry with an explicit timestamp
    pub fn with_timestamp(
        input_text: impl Into<String>,
        output_lines: Vec<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            input_text: input_text.into(),
            output_lines,
            timestamp: timestamp.into(),
        }
    }

    /// Text as submitted
    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Output lines
    #[must_use]
    pub fn output_lines(&self) -> &[String] {
        &self.output_lines
    }

    /// Capture time
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

fn current_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Ordered command history with a recall cursor
#[derive(Clone, Debug, Default)]
pub struct HistoryBuffer {
    entries: Vec<CommandEntry>,
    /// Index being recalled; `None` when editing freely
    cursor: Option<usize>,
}

impl HistoryBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end
    pub fn append(&mut self, entry: CommandEntry) {
        self.entries.push(entry);
    }

    /// Drop every entry and leave recall mode
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Step one entry back in time
    ///
    /// Returns `None` (and changes nothing) when the buffer is empty.
    /// Otherwise returns the input text at the new cursor. The cursor floors
    /// at the oldest entry.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        Some(self.entries[index].input_text())
    }

    /// Step one entry forward in time
    ///
    /// Returns `None` when not recalling. Stepping past the newest entry
    /// leaves recall mode and returns the empty string.
    pub fn recall_next(&mut self) -> Option<&str> {
        let current = self.cursor?;
        let next = current + 1;
        if next >= self.entries.len() {
            self.cursor = None;
            return Some("");
        }
        self.cursor = Some(next);
        Some(self.entries[next].input_text())
    }

    /// Leave recall mode without touching entries
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Current recall position
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// All entries, oldest first
    #[must_use]
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Entry at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CommandEntry> {
        self.entries.get(index)
    }

    /// Submitted texts, oldest first
    pub fn inputs(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(CommandEntry::input_text)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
