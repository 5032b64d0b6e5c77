//! Bootfolio Core - Headless Boot/Shell/Content Console
//!
//! This crate holds everything a bootfolio surface needs to present a
//! terminal-styled portfolio: the boot screen, the simulated shell and the
//! stage machine tying them together. It knows nothing about terminals.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          UI Surfaces                              │
//! │        ┌──────────────┐            ┌──────────────────────┐       │
//! │        │     TUI      │            │  Headless / Tests    │       │
//! │        │  (ratatui)   │            │                      │       │
//! │        └──────┬───────┘            └──────────┬───────────┘       │
//! │               └──────────────┬────────────────┘                   │
//! │                     SurfaceEvent (up)                             │
//! │                   ConsoleMessage (down)                           │
//! └──────────────────────────────┼────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┼────────────────────────────────────┐
//! │                        BOOTFOLIO CORE                             │
//! │  ┌───────────────────────────┴─────────────────────────────────┐  │
//! │  │                         Console                              │  │
//! │  │  ┌──────────┐  ┌──────────────┐  ┌──────────┐  ┌──────────┐ │  │
//! │  │  │  Boot    │  │ ShellSession │  │  Timer   │  │  Stage   │ │  │
//! │  │  │ Sequence │  │ Registry +   │  │  Queue   │  │          │ │  │
//! │  │  │          │  │ History      │  │          │  │          │ │  │
//! │  │  └──────────┘  └──────────────┘  └──────────┘  └──────────┘ │  │
//! │  └─────────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Console`]: Owns the stage, boot screen, shell session and timers
//! - [`SurfaceEvent`]: Events sent from a surface to the console
//! - [`ConsoleMessage`]: Notifications the console queues for surfaces
//! - [`CommandRegistry`]: Normalized command text to output lines
//! - [`HistoryBuffer`]: Submitted commands with up/down recall
//! - [`Profile`]: Portfolio content (boot script, commands, sections)
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use bootfolio_core::{Console, ConsoleConfig, Profile, Stage, SurfaceEvent};
//!
//! let profile = Profile::builtin().expect("built-in profile parses");
//! let mut console = Console::new(&ConsoleConfig::default(), &profile);
//!
//! // Let the boot script play out, then confirm
//! console.advance(Duration::from_secs(10));
//! console.handle_event(SurfaceEvent::ConfirmBoot);
//! console.advance(Duration::from_millis(500));
//! assert_eq!(console.stage(), Stage::Shell);
//! ```
//!
//! # Module Overview
//!
//! - [`boot`]: Boot script lines and reveal/confirm state
//! - [`config`]: Layered configuration (defaults, file, env, CLI)
//! - [`console`]: Stage transition controller
//! - [`events`]: Events from surfaces to the console
//! - [`history`]: Command entries and the recall cursor
//! - [`input`]: Key inputs and the uncommitted input line
//! - [`markup`]: Inline `{tone|text}` markup for output lines
//! - [`messages`]: Messages from the console to surfaces
//! - [`profile`]: Portfolio content loading and validation
//! - [`registry`]: Command registry and built-in commands
//! - [`session`]: Shell session and scroll-back view model
//! - [`stage`]: The three top-level stages
//! - [`timer`]: Virtual-time timer queue
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm or tokio.
//! Time only moves when the caller says so.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod boot;
pub mod config;
pub mod console;
pub mod events;
pub mod history;
pub mod input;
pub mod markup;
pub mod messages;
pub mod profile;
pub mod registry;
pub mod session;
pub mod stage;
pub mod timer;

pub use boot::{BootLine, BootSequence, BootStatus, BootTimings, LineState};
pub use config::{ConfigError, ConfigOverrides, ConfigSource, ConsoleConfig};
pub use console::Console;
pub use events::SurfaceEvent;
pub use history::{CommandEntry, HistoryBuffer};
pub use input::{InputLine, KeyInput};
pub use markup::{Segment, Tone};
pub use messages::ConsoleMessage;
pub use profile::{Profile, ProfileError, Section};
pub use registry::{CommandContext, CommandRegistry, LookupResult, SideEffect};
pub use session::{KeyOutcome, ScrollLine, ShellSession, DEFAULT_PROMPT};
pub use stage::Stage;
pub use timer::{TimerId, TimerQueue};
