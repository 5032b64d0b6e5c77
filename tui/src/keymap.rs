//! Key Mapping
//!
//! Translates crossterm key events into actions. The mapping depends only on
//! the key and the current stage, so it is tested without a terminal.
//!
//! | Stage   | Key                 | Action                        |
//! |---------|---------------------|-------------------------------|
//! | any     | Esc                 | quit                          |
//! | boot    | Enter               | confirm boot                  |
//! | boot    | Ctrl+C              | quit                          |
//! | shell   | Enter               | submit                        |
//! | shell   | Up / Down           | recall older / newer          |
//! | shell   | Tab                 | complete                      |
//! | shell   | Ctrl+C              | interrupt line                |
//! | shell   | Backspace           | delete character              |
//! | shell   | F2                  | open the content view         |
//! | shell   | PgUp / PgDn         | scroll back / forward         |
//! | content | b / Backspace       | back to shell                 |
//! | content | Up / Down           | scroll one line               |
//! | content | PgUp / PgDn         | scroll one page               |
//! | content | n, Tab / p, BackTab | next / previous section       |
//! | content | h                   | next sidebar bay              |
//! | content | s                   | scan the I2C bus              |
//! | content | q, Ctrl+C           | quit                          |
//! | any     | F12                 | toggle developer overlay      |

use bootfolio_core::{KeyInput, Stage, SurfaceEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the app to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Forward to the console
    Surface(SurfaceEvent),
    /// Scroll the active view by lines (negative = up)
    Scroll(isize),
    /// Scroll the active view by one page
    Page {
        /// Direction
        down: bool,
    },
    /// Next content section
    NextSection,
    /// Previous content section
    PrevSection,
    /// Show the next sidebar bay
    NextBay,
    /// Start an I2C bus scan
    ScanBus,
    /// Toggle the developer overlay
    ToggleDev,
    /// Nothing
    Ignore,
}

impl From<KeyInput> for Action {
    fn from(key: KeyInput) -> Self {
        Action::Surface(SurfaceEvent::Key(key))
    }
}

/// Map `key` pressed during `stage`
pub fn map_key(key: KeyEvent, stage: Stage) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match (key.code, stage) {
        (KeyCode::Esc, _) => Action::Surface(SurfaceEvent::Quit),
        (KeyCode::F(12), _) => Action::ToggleDev,

        // Boot
        (KeyCode::Enter, Stage::Booting) => Action::Surface(SurfaceEvent::ConfirmBoot),
        (KeyCode::Char('c'), Stage::Booting) if ctrl => Action::Surface(SurfaceEvent::Quit),
        (_, Stage::Booting) => Action::Ignore,

        // Shell
        (KeyCode::Enter, Stage::Shell) => KeyInput::Submit.into(),
        (KeyCode::Up, Stage::Shell) => KeyInput::RecallOlder.into(),
        (KeyCode::Down, Stage::Shell) => KeyInput::RecallNewer.into(),
        (KeyCode::Tab, Stage::Shell) => KeyInput::Complete.into(),
        (KeyCode::Backspace, Stage::Shell) => KeyInput::Backspace.into(),
        (KeyCode::Char('c'), Stage::Shell) if ctrl => KeyInput::Interrupt.into(),
        (KeyCode::Char(_), Stage::Shell) if ctrl => Action::Ignore,
        (KeyCode::Char(c), Stage::Shell) => KeyInput::Char(c).into(),
        (KeyCode::F(2), Stage::Shell) => Action::Surface(SurfaceEvent::LaunchContent),
        (KeyCode::PageUp, Stage::Shell | Stage::Content) => Action::Page { down: false },
        (KeyCode::PageDown, Stage::Shell | Stage::Content) => Action::Page { down: true },
        (_, Stage::Shell) => Action::Ignore,

        // Content
        (KeyCode::Char('c'), Stage::Content) if ctrl => Action::Surface(SurfaceEvent::Quit),
        (KeyCode::Char('b') | KeyCode::Backspace, Stage::Content) => {
            Action::Surface(SurfaceEvent::ReturnToShell)
        }
        (KeyCode::Char('q'), Stage::Content) => Action::Surface(SurfaceEvent::Quit),
        (KeyCode::Up, Stage::Content) => Action::Scroll(-1),
        (KeyCode::Down, Stage::Content) => Action::Scroll(1),
        (KeyCode::Char('n') | KeyCode::Tab | KeyCode::Right, Stage::Content) => Action::NextSection,
        (KeyCode::Char('p') | KeyCode::BackTab | KeyCode::Left, Stage::Content) => {
            Action::PrevSection
        }
        (KeyCode::Char('h'), Stage::Content) => Action::NextBay,
        (KeyCode::Char('s'), Stage::Content) => Action::ScanBus,
        (_, Stage::Content) => Action::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_boot_only_accepts_enter() {
        assert_eq!(
            map_key(key(KeyCode::Enter), Stage::Booting),
            Action::Surface(SurfaceEvent::ConfirmBoot)
        );
        assert_eq!(map_key(key(KeyCode::Char('x')), Stage::Booting), Action::Ignore);
        assert_eq!(map_key(key(KeyCode::Up), Stage::Booting), Action::Ignore);
    }

    #[test]
    fn test_shell_editing_keys() {
        let cases = [
            (key(KeyCode::Enter), KeyInput::Submit),
            (key(KeyCode::Up), KeyInput::RecallOlder),
            (key(KeyCode::Down), KeyInput::RecallNewer),
            (key(KeyCode::Tab), KeyInput::Complete),
            (key(KeyCode::Backspace), KeyInput::Backspace),
            (ctrl('c'), KeyInput::Interrupt),
            (key(KeyCode::Char('L')), KeyInput::Char('L')),
        ];
        for (event, expected) in cases {
            assert_eq!(map_key(event, Stage::Shell), Action::from(expected));
        }
    }

    #[test]
    fn test_shell_ignores_other_control_chords() {
        assert_eq!(map_key(ctrl('x'), Stage::Shell), Action::Ignore);
    }

    #[test]
    fn test_shift_letters_are_text() {
        let event = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(map_key(event, Stage::Shell), KeyInput::Char('A').into());
    }

    #[test]
    fn test_content_navigation() {
        assert_eq!(
            map_key(key(KeyCode::Char('b')), Stage::Content),
            Action::Surface(SurfaceEvent::ReturnToShell)
        );
        assert_eq!(
            map_key(key(KeyCode::Backspace), Stage::Content),
            Action::Surface(SurfaceEvent::ReturnToShell)
        );
        assert_eq!(map_key(key(KeyCode::Tab), Stage::Content), Action::NextSection);
        assert_eq!(map_key(key(KeyCode::Char('p')), Stage::Content), Action::PrevSection);
        assert_eq!(map_key(key(KeyCode::Down), Stage::Content), Action::Scroll(1));
        assert_eq!(
            map_key(key(KeyCode::PageUp), Stage::Content),
            Action::Page { down: false }
        );
        assert_eq!(
            map_key(key(KeyCode::Char('q')), Stage::Content),
            Action::Surface(SurfaceEvent::Quit)
        );
    }

    #[test]
    fn test_content_hardware_keys() {
        assert_eq!(map_key(key(KeyCode::Char('h')), Stage::Content), Action::NextBay);
        assert_eq!(map_key(key(KeyCode::Char('s')), Stage::Content), Action::ScanBus);
        // in the shell they are just letters
        assert_eq!(map_key(key(KeyCode::Char('s')), Stage::Shell), KeyInput::Char('s').into());
    }

    #[test]
    fn test_esc_quits_everywhere() {
        for stage in [Stage::Booting, Stage::Shell, Stage::Content] {
            assert_eq!(
                map_key(key(KeyCode::Esc), stage),
                Action::Surface(SurfaceEvent::Quit)
            );
        }
    }

    #[test]
    fn test_typing_q_in_shell_is_text() {
        assert_eq!(
            map_key(key(KeyCode::Char('q')), Stage::Shell),
            KeyInput::Char('q').into()
        );
    }
}
