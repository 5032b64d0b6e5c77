//! Console - Stage Transition Controller
//!
//! The single owner of all session state. Surfaces feed it
//! [`SurfaceEvent`]s and elapsed time; it updates the stage, boot screen
//! and shell, and queues [`ConsoleMessage`]s describing what changed.
//!
//! # Design Philosophy
//!
//! Nothing here blocks or spawns. Every delay (boot reveals, boot
//! confirmation, the grace period before leaving the shell) is a timer on a
//! virtual clock that only moves inside [`Console::advance`]. Tests drive
//! the whole experience deterministically by calling `advance` with exact
//! durations.
//!
//! # Stage Flow
//!
//! ```text
//!   Booting ──(confirm + confirm_delay)──▶ Shell ──(exit cmd + grace_delay)──▶ Content
//!                                            ▲                                   │
//!                                            └────────────(return)───────────────┘
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use crate::boot::{BootSequence, BootTimings};
use crate::config::ConsoleConfig;
use crate::events::SurfaceEvent;
use crate::input::KeyInput;
use crate::messages::ConsoleMessage;
use crate::profile::Profile;
use crate::registry::SideEffect;
use crate::session::{KeyOutcome, ShellSession};
use crate::stage::Stage;
use crate::timer::{TimerId, TimerQueue};

/// Work a timer performs when it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerAction {
    RevealBootLine,
    ShowBootPrompt,
    EnterShell,
    EnterContent,
}

/// The console state machine
#[derive(Debug)]
pub struct Console {
    stage: Stage,
    boot: BootSequence,
    timings: BootTimings,
    grace_delay: Duration,
    session: ShellSession,
    timers: TimerQueue<TimerAction>,
    /// Pending stage change, at most one
    pending_transition: Option<(Stage, TimerId)>,
    outbox: VecDeque<ConsoleMessage>,
    shut_down: bool,
}

impl Console {
    /// Create a console for `profile` using `config`
    ///
    /// Starts in [`Stage::Booting`] with the first reveal scheduled, or in
    /// [`Stage::Shell`] when `config.skip_boot` is set.
    #[must_use]
    pub fn new(config: &ConsoleConfig, profile: &Profile) -> Self {
        let mut console = Self {
            stage: Stage::Booting,
            boot: BootSequence::new(profile.boot.clone()),
            timings: config.boot,
            grace_delay: config.grace_delay,
            session: ShellSession::from_profile(profile, config.prompt.clone()),
            timers: TimerQueue::new(),
            pending_transition: None,
            outbox: VecDeque::new(),
            shut_down: false,
        };

        if config.skip_boot {
            console.stage = Stage::Shell;
            tracing::debug!("Boot skipped, starting in shell");
        } else {
            console.schedule_next_reveal(console.timings.initial_delay);
        }

        console
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    /// Handle one event from the surface
    ///
    /// Events that make no sense in the current stage are ignored.
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        if self.shut_down {
            return;
        }

        match (self.stage, event) {
            (_, SurfaceEvent::Quit) => {
                self.cancel_transition();
                self.outbox.push_back(ConsoleMessage::QuitRequested);
            }

            (Stage::Booting, SurfaceEvent::ConfirmBoot | SurfaceEvent::Key(KeyInput::Submit)) => {
                self.confirm_boot();
            }

            (Stage::Shell, SurfaceEvent::Key(key)) => self.handle_shell_key(key),
            (Stage::Shell, SurfaceEvent::LaunchContent) => self.request_content(),

            (Stage::Content, SurfaceEvent::ReturnToShell) => self.transition(Stage::Shell),

            (stage, event) => {
                tracing::debug!(?stage, ?event, "Event ignored in this stage");
            }
        }
    }

    /// Move virtual time forward by `delta`, firing due timers in order
    pub fn advance(&mut self, delta: Duration) {
        if self.shut_down {
            return;
        }

        let horizon = self.timers.now() + delta;
        while let Some(action) = self.timers.pop_due(horizon) {
            self.fire(action);
        }
        self.timers.advance_to(horizon);
    }

    /// Cancel every pending timer and stop reacting to input
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.cancel_transition();
        let cancelled = self.timers.len();
        self.timers.clear();
        self.shut_down = true;
        tracing::debug!(cancelled, "Console shut down");
    }

    // ========================================================================
    // Outputs
    // ========================================================================

    /// Take all queued messages
    pub fn drain_messages(&mut self) -> Vec<ConsoleMessage> {
        self.outbox.drain(..).collect()
    }

    /// Current stage
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Boot screen state
    #[must_use]
    pub fn boot(&self) -> &BootSequence {
        &self.boot
    }

    /// Shell session state
    #[must_use]
    pub fn session(&self) -> &ShellSession {
        &self.session
    }

    /// Stage a scheduled transition will move to
    #[must_use]
    pub fn pending_transition(&self) -> Option<Stage> {
        self.pending_transition.map(|(to, _)| to)
    }

    /// Number of timers still pending
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Virtual time since the console was created
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.timers.now()
    }

    /// Whether [`Console::shutdown`] was called
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn fire(&mut self, action: TimerAction) {
        match action {
            TimerAction::RevealBootLine => {
                if let Some(index) = self.boot.reveal_next() {
                    self.outbox.push_back(ConsoleMessage::BootLineShown { index });
                    let delay = self.boot.lines()[index].delay();
                    self.schedule_next_reveal(delay);
                }
            }
            TimerAction::ShowBootPrompt => {
                self.boot.show_prompt();
                self.outbox.push_back(ConsoleMessage::BootPromptReady);
            }
            TimerAction::EnterShell | TimerAction::EnterContent => {
                if let Some((to, _)) = self.pending_transition.take() {
                    self.transition(to);
                }
            }
        }
    }

    /// Schedule whatever comes after the lines revealed so far
    fn schedule_next_reveal(&mut self, after_last: Duration) {
        if self.boot.all_revealed() {
            let after = if self.boot.revealed() == 0 {
                after_last + self.timings.prompt_delay
            } else {
                self.timings.prompt_delay
            };
            self.timers.schedule(after, TimerAction::ShowBootPrompt);
        } else {
            self.timers.schedule(after_last, TimerAction::RevealBootLine);
        }
    }

    fn confirm_boot(&mut self) {
        if !self.boot.confirm() {
            tracing::debug!("Boot confirmation ignored");
            return;
        }
        self.outbox.push_back(ConsoleMessage::BootConfirmed);
        self.schedule_transition(Stage::Shell, self.timings.confirm_delay, TimerAction::EnterShell);
    }

    fn handle_shell_key(&mut self, key: KeyInput) {
        match self.session.handle_key(key) {
            KeyOutcome::Appended { index, effect } => {
                self.outbox.push_back(ConsoleMessage::EntryAppended { index });
                if effect == SideEffect::RequestStageTransition {
                    self.request_content();
                }
            }
            KeyOutcome::Cleared => self.outbox.push_back(ConsoleMessage::HistoryCleared),
            KeyOutcome::Edited
            | KeyOutcome::Unchanged
            | KeyOutcome::Blank
            | KeyOutcome::Interrupted => {}
        }
    }

    fn request_content(&mut self) {
        self.schedule_transition(Stage::Content, self.grace_delay, TimerAction::EnterContent);
    }

    fn schedule_transition(&mut self, to: Stage, after: Duration, action: TimerAction) {
        if let Some((pending, _)) = self.pending_transition {
            tracing::debug!(?pending, requested = ?to, "Transition already pending");
            return;
        }
        let id = self.timers.schedule(after, action);
        self.pending_transition = Some((to, id));
        self.outbox
            .push_back(ConsoleMessage::TransitionScheduled { to, after });
    }

    /// Drop a scheduled stage change before its timer fires
    fn cancel_transition(&mut self) {
        if let Some((to, id)) = self.pending_transition.take() {
            if self.timers.cancel(id).is_some() {
                tracing::debug!(?to, "Cancelled pending transition");
            }
        }
    }

    fn transition(&mut self, to: Stage) {
        let from = self.stage;
        if !from.can_transition_to(to) {
            tracing::warn!(?from, ?to, "Rejected illegal stage transition");
            return;
        }
        self.stage = to;
        tracing::info!(%from, %to, "Stage changed");
        self.outbox.push_back(ConsoleMessage::StageChanged { from, to });
    }
}
