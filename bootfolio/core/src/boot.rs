//! Boot Sequence
//!
//! The ordered status lines shown while "booting", plus the confirmation
//! prompt that ends the stage.
//!
//! This type only tracks what is visible. When each step happens is decided
//! by [`crate::Console`], which schedules reveals on its timer queue using
//! [`BootTimings`] and the per-line delays.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Final status of a boot line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BootStatus {
    /// Completed normally
    #[default]
    Ok,
    /// Completed with a warning
    Warning,
    /// Failed (cosmetic only)
    Error,
}

impl BootStatus {
    /// Four-column symbol shown between brackets
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Ok => " OK ",
            Self::Warning => "WARN",
            Self::Error => "ERR ",
        }
    }

    /// Trailing label shown after a completed line
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Symbol shown for a line that is visible but still loading
pub const LOADING_SYMBOL: &str = "... ";

/// One boot status line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootLine {
    /// Message text
    pub text: String,
    /// Status once completed
    #[serde(default)]
    pub status: BootStatus,
    /// Delay before the next line appears
    pub delay_ms: u64,
}

impl BootLine {
    /// Create a line
    pub fn new(text: impl Into<String>, status: BootStatus, delay_ms: u64) -> Self {
        Self {
            text: text.into(),
            status,
            delay_ms,
        }
    }

    /// Delay before the following line is revealed
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Visibility of a single line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    /// Not yet shown
    Hidden,
    /// Shown and newest
    Loading,
    /// Shown with a newer line after it
    Completed(BootStatus),
}

/// Fixed delays around the line reveals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootTimings {
    /// Before the first line
    pub initial_delay: Duration,
    /// After the last line, before the prompt
    pub prompt_delay: Duration,
    /// After confirmation, before the shell appears
    pub confirm_delay: Duration,
}

impl Default for BootTimings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1500),
            prompt_delay: Duration::from_millis(1000),
            confirm_delay: Duration::from_millis(500),
        }
    }
}

/// Visible state of the boot screen
#[derive(Clone, Debug)]
pub struct BootSequence {
    lines: Vec<BootLine>,
    /// Number of lines revealed so far
    revealed: usize,
    prompt_visible: bool,
    confirmed: bool,
}

impl BootSequence {
    /// Create a sequence with nothing revealed
    #[must_use]
    pub fn new(lines: Vec<BootLine>) -> Self {
        Self {
            lines,
            revealed: 0,
            prompt_visible: false,
            confirmed: false,
        }
    }

    /// All lines, hidden or not
    #[must_use]
    pub fn lines(&self) -> &[BootLine] {
        &self.lines
    }

    /// Reveal the next line, returning its index
    pub fn reveal_next(&mut self) -> Option<usize> {
        if self.revealed >= self.lines.len() {
            return None;
        }
        self.revealed += 1;
        Some(self.revealed - 1)
    }

    /// Number of visible lines
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Whether every line is visible
    #[must_use]
    pub fn all_revealed(&self) -> bool {
        self.revealed == self.lines.len()
    }

    /// State of line `index`
    #[must_use]
    pub fn line_state(&self, index: usize) -> LineState {
        match self.lines.get(index) {
            Some(_) if index + 1 < self.revealed => LineState::Completed(self.lines[index].status),
            Some(_) if index + 1 == self.revealed => LineState::Loading,
            _ => LineState::Hidden,
        }
    }

    /// Show the confirmation prompt
    pub fn show_prompt(&mut self) {
        self.prompt_visible = true;
    }

    /// Whether the confirmation prompt is showing
    #[must_use]
    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    /// Accept the confirmation key
    ///
    /// Returns `true` only for the first confirmation after the prompt is
    /// visible; earlier or repeated presses are ignored.
    pub fn confirm(&mut self) -> bool {
        if !self.prompt_visible || self.confirmed {
            return false;
        }
        self.confirmed = true;
        true
    }

    /// Whether the confirmation key was accepted
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}
