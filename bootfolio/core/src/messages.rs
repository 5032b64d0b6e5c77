//! Console Messages
//!
//! Notices the [`crate::Console`] queues for surfaces. They tell a surface
//! *that* something changed so it can react (reset scroll, play a sound,
//! exit); the state itself is always read back from the console.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// Messages from console to UI surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsoleMessage {
    /// The active stage changed
    StageChanged {
        /// Previous stage
        from: Stage,
        /// New stage
        to: Stage,
    },

    /// A boot line became visible
    BootLineShown {
        /// Index into the boot script
        index: usize,
    },

    /// The boot confirmation prompt is showing
    BootPromptReady,

    /// The boot confirmation was accepted
    BootConfirmed,

    /// A shell entry was recorded
    EntryAppended {
        /// Index into history
        index: usize,
    },

    /// Shell history was emptied
    HistoryCleared,

    /// A stage change will happen after a delay
    TransitionScheduled {
        /// Target stage
        to: Stage,
        /// Delay before it happens
        after: Duration,
    },

    /// The surface should exit
    QuitRequested,
}
