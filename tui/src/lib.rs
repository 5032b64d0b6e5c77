//! Bootfolio TUI - Terminal surface for the bootfolio console
//!
//! This crate renders a [`bootfolio_core::Console`] full-screen: the boot
//! screen, the kernel-mode shell and the userland content pages with their
//! simulated hardware sidebar.
//!
//! # Architecture
//!
//! - **App**: Event loop, frame timing, console message handling
//! - **Keymap**: Terminal keys to console events or local view actions
//! - **Compositor**: Layered rendering with z-ordering per stage
//! - **Views**: Core state to styled lines for each stage
//! - **Widgets**: Borderless scrollable text blocks, hardware panel
//! - **Peripherals**: LCD, LED matrix, watchdog and status animations

pub mod app;
pub mod compositor;
pub mod keymap;
pub mod peripherals;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::App;
