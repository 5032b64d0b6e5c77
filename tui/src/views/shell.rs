//! Shell screen
//!
//! A fixed header, then the welcome banner, every history entry and the
//! live prompt as one continuous scroll-back.

use bootfolio_core::profile::Identity;
use bootfolio_core::{ScrollLine, ShellSession};
use ratatui::style::{Modifier, Style};

use crate::theme::{ACCENT_CYAN, MUTED_GRAY, PHOSPHOR, PHOSPHOR_DIM, PROMPT_GREEN};
use crate::widgets::StyledLine;

/// Rows taken by [`header`]
pub const HEADER_HEIGHT: u16 = 2;

/// Title and hint shown above the scroll-back
pub fn header(identity: &Identity) -> Vec<StyledLine> {
    vec![
        StyledLine::raw(
            identity.shell_title.as_str(),
            Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD),
        ),
        StyledLine::raw(identity.shell_hint.as_str(), Style::default().fg(MUTED_GRAY)),
    ]
}

/// Scroll-back plus the prompt line
///
/// User input is rendered literally; only registry output is parsed for
/// tone markup. The cursor holds steady while the user is typing and blinks
/// with `cursor_on` otherwise.
pub fn scrollback(session: &ShellSession, cursor_on: bool) -> Vec<StyledLine> {
    let text = Style::default().fg(PHOSPHOR);
    let prompt = Style::default().fg(PROMPT_GREEN).add_modifier(Modifier::BOLD);

    let mut lines: Vec<StyledLine> = session
        .scrollback()
        .map(|row| match row {
            ScrollLine::Banner(line) => {
                StyledLine::markup_with(line, Style::default().fg(PHOSPHOR_DIM))
            }
            ScrollLine::Command { prompt: p, input } => {
                StyledLine::raw(p, prompt).span(" ", text).span(input, text)
            }
            ScrollLine::Output(line) => StyledLine::markup(line),
        })
        .collect();

    let cursor = if cursor_on || session.is_typing() { "_" } else { " " };
    lines.push(
        StyledLine::raw(session.prompt(), prompt)
            .span(" ", text)
            .span(session.input(), text)
            .span(cursor, text),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootfolio_core::{KeyInput, Profile, DEFAULT_PROMPT};
    use pretty_assertions::assert_eq;

    fn session() -> ShellSession {
        ShellSession::from_profile(&Profile::builtin().unwrap(), DEFAULT_PROMPT)
    }

    fn texts(lines: &[StyledLine]) -> Vec<String> {
        lines.iter().map(StyledLine::text).collect()
    }

    #[test]
    fn test_fresh_session_shows_welcome_and_prompt() {
        let lines = scrollback(&session(), true);
        let texts = texts(&lines);
        assert_eq!(texts[0], "Welcome to Abhiraj's Portfolio System v2.4.1");
        assert_eq!(texts.last().map(String::as_str), Some("user@portfolio:~$ _"));
    }

    #[test]
    fn test_markup_in_input_is_literal() {
        let mut s = session();
        for c in "{err|x}".chars() {
            s.handle_key(KeyInput::Char(c));
        }
        s.handle_key(KeyInput::Submit);

        let texts = texts(&scrollback(&s, false));
        assert!(texts.contains(&"user@portfolio:~$ {err|x}".to_string()));
        assert!(texts.contains(&"bash: {err|x}: command not found".to_string()));
        assert_eq!(texts.last().map(String::as_str), Some("user@portfolio:~$  "));
    }

    #[test]
    fn test_cursor_steady_while_typing() {
        let mut s = session();
        let idle = texts(&scrollback(&s, false));
        assert_eq!(idle.last().map(String::as_str), Some("user@portfolio:~$  "));

        s.handle_key(KeyInput::Char('l'));
        let typing = texts(&scrollback(&s, false));
        assert_eq!(typing.last().map(String::as_str), Some("user@portfolio:~$ l_"));

        s.handle_key(KeyInput::Backspace);
        let erased = texts(&scrollback(&s, false));
        assert_eq!(erased.last().map(String::as_str), Some("user@portfolio:~$  "));
    }

    #[test]
    fn test_output_markup_is_stripped_for_display() {
        let mut s = session();
        for c in "run projects".chars() {
            s.handle_key(KeyInput::Char(c));
        }
        s.handle_key(KeyInput::Submit);
        let texts = texts(&scrollback(&s, true));
        assert!(texts.iter().any(|t| t.contains("| [DEPLOYED]      |")));
        assert!(!texts.iter().any(|t| t.contains("{ok|")));
    }

    #[test]
    fn test_header_lines() {
        let identity = Profile::builtin().unwrap().identity;
        let lines = header(&identity);
        assert_eq!(lines.len(), usize::from(HEADER_HEIGHT));
        assert_eq!(lines[0].text(), "Kernel Mode - Core System");
    }
}
