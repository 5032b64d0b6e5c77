//! End-to-end TUI flow against a test backend
//!
//! Drives [`App`] with synthetic key events and virtual frame time, then
//! reads back what would be on screen. No real terminal is needed.
//!
//! ```bash
//! cargo test -p bootfolio-tui --test app_flow_test
//! ```

use std::time::Duration;

use bootfolio_core::{ConsoleConfig, Profile, Stage};
use bootfolio_tui::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const WIDTH: u16 = 100;
const HEIGHT: u16 = 30;

// ============================================================================
// Helpers
// ============================================================================

fn app(config: &ConsoleConfig) -> App {
    let profile = Profile::builtin().expect("built-in profile");
    App::new(config, profile, (WIDTH, HEIGHT))
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(WIDTH, HEIGHT)).expect("test terminal")
}

fn screen(app: &mut App, terminal: &mut Terminal<TestBackend>) -> String {
    app.draw(terminal).expect("draw");
    let buf = terminal.backend().buffer();
    let area = buf.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_line(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter);
}

fn shell_app() -> App {
    let mut config = ConsoleConfig::default();
    config.skip_boot = true;
    app(&config)
}

// ============================================================================
// Boot
// ============================================================================

#[test]
fn boot_screen_shows_prompt_after_script() {
    let mut app = app(&ConsoleConfig::default());
    let mut term = terminal();

    let first = screen(&mut app, &mut term);
    assert!(first.contains("bootloader"), "status bar names the stage:\n{first}");
    assert!(!first.contains("Press Enter"));

    app.tick(Duration::from_secs(10));
    let ready = screen(&mut app, &mut term);
    assert!(ready.contains("Boot sequence complete."), "{ready}");
    assert!(ready.contains("Press Enter to load kernel"));
    assert!(ready.contains("[ OK ]"));
}

#[test]
fn enter_confirms_boot_and_opens_shell() {
    let mut app = app(&ConsoleConfig::default());
    let mut term = terminal();

    app.tick(Duration::from_secs(10));
    press(&mut app, KeyCode::Enter);
    let loading = screen(&mut app, &mut term);
    assert!(loading.contains("Loading kernel..."), "{loading}");
    assert_eq!(app.console().stage(), Stage::Booting);

    app.tick(Duration::from_millis(500));
    assert_eq!(app.console().stage(), Stage::Shell);

    let shell = screen(&mut app, &mut term);
    assert!(shell.contains("Kernel Mode - Core System"), "{shell}");
    assert!(shell.contains("Welcome to Abhiraj's Portfolio System"));
    assert!(shell.contains("user@portfolio:~$"));
}

// ============================================================================
// Shell
// ============================================================================

#[test]
fn typed_command_is_echoed_with_output() {
    let mut app = shell_app();
    let mut term = terminal();

    type_line(&mut app, "whoami");
    type_line(&mut app, "sudo make coffee");
    let text = screen(&mut app, &mut term);

    assert!(text.contains("user@portfolio:~$ whoami"), "{text}");
    assert!(text.contains("bash: sudo make coffee: command not found"));
    assert!(app.is_running());
}

#[test]
fn long_scrollback_follows_newest_entry() {
    let mut app = shell_app();
    let mut term = terminal();

    for _ in 0..15 {
        type_line(&mut app, "help");
    }
    type_line(&mut app, "nope");
    let text = screen(&mut app, &mut term);
    assert!(text.contains("bash: nope: command not found"), "{text}");

    press(&mut app, KeyCode::PageUp);
    let scrolled = screen(&mut app, &mut term);
    assert!(!scrolled.contains("bash: nope"));
    assert!(scrolled.contains("more below"));
}

// ============================================================================
// Content
// ============================================================================

#[test]
fn userland_opens_content_after_grace_delay() {
    let mut app = shell_app();
    let mut term = terminal();

    type_line(&mut app, "userland");
    let pending = screen(&mut app, &mut term);
    assert!(pending.contains("Starting userland..."), "{pending}");
    assert_eq!(app.console().stage(), Stage::Shell);

    app.tick(Duration::from_millis(500));
    assert_eq!(app.console().stage(), Stage::Content);

    let content = screen(&mut app, &mut term);
    assert!(content.contains(" Home "), "{content}");
    assert!(content.contains("LCD0 16x2"));
    assert!(content.contains("Abhiraj R Singh"));
}

#[test]
fn content_navigation_and_return_to_shell() {
    let mut app = shell_app();
    let mut term = terminal();

    type_line(&mut app, "whoami");
    press(&mut app, KeyCode::F(2));
    app.tick(Duration::from_millis(500));
    assert_eq!(app.console().stage(), Stage::Content);

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.content_view().active(), 1);
    let about = screen(&mut app, &mut term);
    assert!(
        about.lines().any(|l| l.trim_start().starts_with("About")),
        "section heading:\n{about}"
    );

    press(&mut app, KeyCode::Char('b'));
    assert_eq!(app.console().stage(), Stage::Shell);
    let shell = screen(&mut app, &mut term);
    assert!(shell.contains("user@portfolio:~$ whoami"), "history survives:\n{shell}");
}

#[test]
fn narrow_terminal_hides_hardware_panel() {
    let mut app = shell_app();
    let mut term = terminal();

    type_line(&mut app, "userland");
    app.tick(Duration::from_millis(500));

    app.handle_resize(60, 20);
    let mut narrow = Terminal::new(TestBackend::new(60, 20)).expect("test terminal");
    let text = screen(&mut app, &mut narrow);
    assert!(!text.contains("LCD0"), "{text}");
    assert!(text.contains(" Home "));

    app.handle_resize(WIDTH, HEIGHT);
    assert!(screen(&mut app, &mut term).contains("LCD0"));
}

#[test]
fn sidebar_bays_show_registers_and_i2c() {
    let mut app = shell_app();
    let mut term = terminal();

    type_line(&mut app, "userland");
    app.tick(Duration::from_millis(500));
    assert!(screen(&mut app, &mut term).contains("LED0 8x8"));

    press(&mut app, KeyCode::Char('h'));
    let registers = screen(&mut app, &mut term);
    assert!(registers.contains("REG0 0x20001000"), "{registers}");
    assert!(registers.contains("SKILL_C"));
    assert!(!registers.contains("LED0"));
    assert!(registers.contains("Abhiraj R Singh"), "LCD stays on top");

    press(&mut app, KeyCode::Char('s'));
    let scanning = screen(&mut app, &mut term);
    assert!(scanning.contains("I2C0 400kHz"), "{scanning}");
    assert!(scanning.contains("scanning..."));

    app.tick(Duration::from_secs(2));
    let done = screen(&mut app, &mut term);
    assert!(done.contains("online  4 dev"), "{done}");
    assert!(done.contains("0x40 Vehicle Security"));

    press(&mut app, KeyCode::Char('h'));
    assert!(screen(&mut app, &mut term).contains("LED0 8x8"));
}

#[test]
fn short_terminal_still_draws_sidebar() {
    let mut app = shell_app();

    type_line(&mut app, "userland");
    app.tick(Duration::from_millis(500));

    app.handle_resize(WIDTH, 3);
    let mut short = Terminal::new(TestBackend::new(WIDTH, 3)).expect("test terminal");
    let text = screen(&mut app, &mut short);
    assert!(text.lines().next().is_some_and(|l| l.contains("LCD0 16x2")), "{text}");
}

// ============================================================================
// Quit
// ============================================================================

#[test]
fn escape_quits_from_every_stage() {
    let mut booting = app(&ConsoleConfig::default());
    press(&mut booting, KeyCode::Esc);
    assert!(!booting.is_running());
    assert!(booting.goodbye().is_some());

    let mut shell = shell_app();
    press(&mut shell, KeyCode::Esc);
    assert!(!shell.is_running());
}

#[test]
fn dev_toggle_shows_overlay() {
    let mut app = shell_app();
    let mut term = terminal();
    assert!(!screen(&mut app, &mut term).contains("[DEV"));

    press(&mut app, KeyCode::F(12));
    assert!(screen(&mut app, &mut term).contains("[DEV t="));

    press(&mut app, KeyCode::F(12));
    assert!(!screen(&mut app, &mut term).contains("[DEV"));
}
