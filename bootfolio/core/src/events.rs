//! Surface Events
//!
//! Events sent from a UI surface to the [`crate::Console`].
//!
//! # Design Philosophy
//!
//! Surfaces report what the user did, not what it means. Whether a key is
//! ignored, edits the prompt or confirms the boot screen depends on the
//! current stage, and only the console knows that.

use serde::{Deserialize, Serialize};

use crate::input::KeyInput;

/// Events from UI surface to console
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    // ============================================
    // Input Events
    // ============================================
    /// A key the shell vocabulary understands
    Key(KeyInput),

    // ============================================
    // Navigation Events
    // ============================================
    /// The boot confirmation key was pressed
    ConfirmBoot,

    /// Leave the shell for the content view without typing a command
    LaunchContent,

    /// The content view's "back" action
    ReturnToShell,

    // ============================================
    // Lifecycle Events
    // ============================================
    /// The user asked to quit
    Quit,
}
