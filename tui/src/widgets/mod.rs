//! Custom widgets

pub mod hardware;
pub mod text_block;

pub use hardware::{Bay, HardwarePanel, PANEL_WIDTH};
pub use text_block::{StyledLine, TextBlock, TextBlockState};
