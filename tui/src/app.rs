//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize)
//! - The embedded [`Console`] for all session state
//! - Per-stage layers in the compositor
//!
//! # Frame Flow
//!
//! 1. Convert terminal events to actions via [`crate::keymap`]
//! 2. Forward console actions as [`SurfaceEvent`]s
//! 3. Advance the console and peripherals by the real frame delta
//! 4. React to drained [`ConsoleMessage`]s (scroll, quit)
//! 5. Render the visible stage into its layers and composite

use std::io;
use std::time::{Duration, Instant};

use bootfolio_core::{Console, ConsoleConfig, ConsoleMessage, Profile, Stage, SurfaceEvent};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use rand::seq::SliceRandom;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{StatefulWidget, Widget};
use ratatui::Terminal;

use crate::compositor::{Compositor, LayerId};
use crate::keymap::{self, Action};
use crate::peripherals::Peripherals;
use crate::theme::{MUTED_GRAY, PHOSPHOR_DIM, STATUS_WARN};
use crate::views::{content, shell, BootScreen, ContentView};
use crate::widgets::{Bay, HardwarePanel, StyledLine, TextBlock, TextBlockState, PANEL_WIDTH};

/// Narrowest terminal that still gets the hardware sidebar
const SIDEBAR_MIN_WIDTH: u16 = 72;

/// Cursor blink half-period
const CURSOR_BLINK: Duration = Duration::from_millis(500);

/// Lines printed after the TUI closes
const GOODBYES: &[&str] = &[
    "System halted.",
    "Watchdog disarmed. See you!",
    "Peripherals unmounted. Bye!",
    "Connection closed by remote host.",
    "Kernel going down for halt NOW.",
];

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Goodbye message to show on exit
    goodbye_message: Option<String>,

    // === Console Integration ===
    /// Session state machine
    console: Console,
    /// Content shown on the boot and content screens
    profile: Profile,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Shell scroll-back position
    shell_scroll: TextBlockState,
    /// Content section and scroll
    content: ContentView,
    /// Sidebar animations
    peripherals: Peripherals,
    /// Sidebar bay under the LCD
    bay: Bay,

    // === Misc State ===
    /// Last frame time
    last_frame: Instant,
    /// Time since the cursor last restarted its blink
    cursor_clock: Duration,
    /// Developer overlay
    dev_mode: bool,
    /// Terminal size
    size: (u16, u16),
}

/// Layer IDs for UI regions
struct AppLayers {
    boot: LayerId,
    header: LayerId,
    shell: LayerId,
    content: LayerId,
    sidebar: LayerId,
    status: LayerId,
}

/// Screen regions for one terminal size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Regions {
    body: Rect,
    header: Rect,
    shell: Rect,
    content: Rect,
    sidebar: Option<Rect>,
    status: Rect,
}

impl Regions {
    fn new(width: u16, height: u16) -> Self {
        let body_height = height.saturating_sub(1);
        let body = Rect::new(0, 0, width, body_height);
        let header_height = shell::HEADER_HEIGHT.min(body_height);
        let header = Rect::new(0, 0, width, header_height);
        let shell = Rect::new(0, header_height, width, body_height - header_height);

        let (content, sidebar) = if width >= SIDEBAR_MIN_WIDTH {
            let content_width = width - PANEL_WIDTH - 1;
            (
                Rect::new(0, 0, content_width, body_height),
                Some(Rect::new(content_width + 1, 0, PANEL_WIDTH, body_height)),
            )
        } else {
            (body, None)
        };

        Self {
            body,
            header,
            shell,
            content,
            sidebar,
            status: Rect::new(0, body_height, width, height.min(1)),
        }
    }
}

impl App {
    /// Create an app for a terminal of `size` (columns, rows)
    pub fn new(config: &ConsoleConfig, profile: Profile, size: (u16, u16)) -> Self {
        let regions = Regions::new(size.0, size.1);
        let mut compositor = Compositor::new(Rect::new(0, 0, size.0, size.1));

        let layers = AppLayers {
            boot: compositor.create_layer(regions.body, 0),
            header: compositor.create_layer(regions.header, 10),
            shell: compositor.create_layer(regions.shell, 0),
            content: compositor.create_layer(regions.content, 0),
            sidebar: compositor.create_layer(regions.sidebar.unwrap_or_default(), 20),
            status: compositor.create_layer(regions.status, 30),
        };

        let console = Console::new(config, &profile);
        let content = ContentView::new(profile.sections.len());
        let peripherals = Peripherals::new(&profile);

        let mut app = Self {
            running: true,
            goodbye_message: None,
            console,
            profile,
            compositor,
            layers,
            shell_scroll: TextBlockState::default(),
            content,
            peripherals,
            bay: Bay::default(),
            last_frame: Instant::now(),
            cursor_clock: Duration::ZERO,
            dev_mode: false,
            size,
        };
        app.sync_layers();
        app
    }

    /// Enable the developer overlay from the start
    #[must_use]
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // ~20 FPS is plenty for a terminal and keeps boot timing smooth
        let frame_duration = Duration::from_millis(50);

        let mut event_stream = EventStream::new();

        self.last_frame = Instant::now();
        self.draw(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        Some(Ok(Event::Resize(w, h))) => self.handle_resize(w, h),
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => {
                            tracing::warn!("Terminal event stream closed");
                            self.running = false;
                        }
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            self.update();
            self.draw(terminal)?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        self.console.shutdown();
        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = keymap::map_key(key, self.console.stage());
        tracing::trace!(?key, ?action, "Key");

        match action {
            Action::Surface(event) => {
                if let SurfaceEvent::Key(_) = event {
                    self.cursor_clock = Duration::ZERO;
                    self.shell_scroll.scroll_to_bottom();
                }
                self.console.handle_event(event);
                self.process_console_messages();
            }
            Action::Scroll(delta) => self.active_scroll().scroll(delta),
            Action::Page { down } => self.active_scroll().page(down),
            Action::NextSection => self.content.next(),
            Action::PrevSection => self.content.prev(),
            Action::NextBay => self.bay = self.bay.next(),
            Action::ScanBus => {
                self.bay = Bay::I2c;
                self.peripherals.i2c.scan();
            }
            Action::ToggleDev => self.dev_mode = !self.dev_mode,
            Action::Ignore => {}
        }
    }

    /// Handle terminal resize
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.compositor.resize(Rect::new(0, 0, width, height));

        let regions = Regions::new(width, height);
        self.compositor.place_layer(self.layers.boot, regions.body);
        self.compositor.place_layer(self.layers.header, regions.header);
        self.compositor.place_layer(self.layers.shell, regions.shell);
        self.compositor.place_layer(self.layers.content, regions.content);
        self.compositor
            .place_layer(self.layers.sidebar, regions.sidebar.unwrap_or_default());
        self.compositor.place_layer(self.layers.status, regions.status);
        self.sync_layers();

        tracing::debug!(width, height, "Resized");
    }

    /// Advance by the real time since the last frame
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.tick(delta);
    }

    /// Advance everything time-driven by `delta`
    pub fn tick(&mut self, delta: Duration) {
        self.console.advance(delta);
        if self.console.stage() == Stage::Content {
            self.peripherals.tick(delta);
        }
        self.cursor_clock += delta;
        self.process_console_messages();
    }

    /// React to everything the console queued
    fn process_console_messages(&mut self) {
        for msg in self.console.drain_messages() {
            match msg {
                ConsoleMessage::StageChanged { to, .. } => {
                    match to {
                        Stage::Content => self.content.reset(),
                        Stage::Shell => self.shell_scroll.scroll_to_bottom(),
                        Stage::Booting => {}
                    }
                    self.sync_layers();
                }
                ConsoleMessage::EntryAppended { .. } | ConsoleMessage::HistoryCleared => {
                    self.shell_scroll.scroll_to_bottom();
                }
                ConsoleMessage::QuitRequested => {
                    self.generate_goodbye();
                    self.running = false;
                }
                other => tracing::trace!(?other, "Console message"),
            }
        }
    }

    /// Show only the layers of the current stage
    fn sync_layers(&mut self) {
        let stage = self.console.stage();
        let wide = Regions::new(self.size.0, self.size.1).sidebar.is_some();

        let c = &mut self.compositor;
        c.set_visible(self.layers.boot, stage == Stage::Booting);
        c.set_visible(self.layers.header, stage == Stage::Shell);
        c.set_visible(self.layers.shell, stage == Stage::Shell);
        c.set_visible(self.layers.content, stage == Stage::Content);
        c.set_visible(self.layers.sidebar, stage == Stage::Content && wide);
    }

    fn active_scroll(&mut self) -> &mut TextBlockState {
        match self.console.stage() {
            Stage::Content => &mut self.content.scroll,
            Stage::Booting | Stage::Shell => &mut self.shell_scroll,
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the UI
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        match self.console.stage() {
            Stage::Booting => self.render_boot(),
            Stage::Shell => self.render_shell(),
            Stage::Content => self.render_content(),
        }
        self.render_status();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    if let (Some(src), Some(dst)) = (output.cell((x, y)), buf.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    fn render_boot(&mut self) {
        let screen = BootScreen::build(self.console.boot(), &self.profile.identity);
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.boot) {
            let area = buf.area;
            screen.render(buf, area);
        }
    }

    fn render_shell(&mut self) {
        let header = shell::header(&self.profile.identity);
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.header) {
            let area = buf.area;
            for (y, line) in (area.y..area.bottom()).zip(&header) {
                line.render(buf, area.x, y, area.width);
            }
        }

        let cursor_on = (self.cursor_clock.as_millis() / CURSOR_BLINK.as_millis()) % 2 == 0;
        let lines = shell::scrollback(self.console.session(), cursor_on);
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.shell) {
            let area = buf.area;
            TextBlock::new(&lines).render(area, buf, &mut self.shell_scroll);
        }
    }

    fn render_content(&mut self) {
        if self.compositor.is_visible(self.layers.sidebar) {
            if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.sidebar) {
                let area = buf.area;
                HardwarePanel::new(&self.peripherals).bay(self.bay).render(area, buf);
            }
        }

        let sections = &self.profile.sections;
        let active = self.content.active();
        let tabs = content::tabs(sections, active);
        let body = sections.get(active).map(content::body).unwrap_or_default();

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.content) {
            let area = buf.area;
            if area.height < 3 {
                return;
            }
            tabs.render(buf, area.x, area.y, area.width);

            let body_area = Rect::new(area.x + 1, area.y + 2, area.width.saturating_sub(2), area.height - 3);
            TextBlock::new(&body).render(body_area, buf, &mut self.content.scroll);

            let hint = StyledLine::raw(content::CONTENT_HINT, Style::default().fg(MUTED_GRAY));
            hint.render(buf, area.x + 1, area.bottom() - 1, area.width.saturating_sub(1));
        }
    }

    fn render_status(&mut self) {
        let stage = self.console.stage();
        let keys = match stage {
            Stage::Booting => "Enter confirm | Esc quit",
            Stage::Shell => "PgUp/PgDn scroll | F2 userland | Esc quit",
            Stage::Content => "b back | n/p sections | h bay | s scan | q quit",
        };

        let mut status = StyledLine::raw(format!(" {} | {}", stage.label(), keys), Style::default().fg(PHOSPHOR_DIM));

        let below = match stage {
            Stage::Shell => self.shell_scroll.lines_below(),
            Stage::Content => self.content.scroll.lines_below(),
            Stage::Booting => 0,
        };
        if below > 0 {
            status = status.span(format!(" [{below} more below]"), Style::default().fg(STATUS_WARN));
        }

        if self.dev_mode {
            status = status.span(
                format!(
                    " [DEV t={}ms timers={}]",
                    self.console.elapsed().as_millis(),
                    self.console.pending_timers()
                ),
                Style::default().fg(MUTED_GRAY),
            );
        }

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            let area = buf.area;
            if area.height > 0 {
                status.render(buf, area.x, area.y, area.width);
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The embedded console
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Content view state
    pub fn content_view(&self) -> &ContentView {
        &self.content
    }

    /// Whether the loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pick a goodbye line
    fn generate_goodbye(&mut self) {
        let line = GOODBYES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("System halted.");
        self.goodbye_message = Some(line.to_string());
    }

    /// Get the goodbye message for display after TUI closes
    pub fn goodbye(&self) -> Option<&str> {
        self.goodbye_message.as_deref()
    }
}
