//! Console Stages
//!
//! The three top-level screens and the only edges allowed between them.

use serde::{Deserialize, Serialize};

/// Top-level screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Boot animation
    #[default]
    Booting,
    /// Simulated shell
    Shell,
    /// Résumé view
    Content,
}

impl Stage {
    /// Whether moving from `self` to `to` is a legal transition
    ///
    /// Allowed: `Booting → Shell`, `Shell → Content`, `Content → Shell`.
    #[must_use]
    pub fn can_transition_to(self, to: Stage) -> bool {
        matches!(
            (self, to),
            (Stage::Booting, Stage::Shell)
                | (Stage::Shell, Stage::Content)
                | (Stage::Content, Stage::Shell)
        )
    }

    /// Short name for headers and logs
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Stage::Booting => "bootloader",
            Stage::Shell => "kernel",
            Stage::Content => "userland",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
