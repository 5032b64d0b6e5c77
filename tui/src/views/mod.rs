//! Per-stage views
//!
//! Each view turns core state into [`StyledLine`](crate::widgets::StyledLine)s.
//! Layout and layers belong to the app.

pub mod boot;
pub mod content;
pub mod shell;

pub use boot::BootScreen;
pub use content::ContentView;
