//! Content screen
//!
//! The résumé sections with a tab strip, shown after leaving the shell.

use bootfolio_core::Section;
use ratatui::style::{Modifier, Style};

use crate::theme::{ACCENT_CYAN, MUTED_GRAY, PHOSPHOR_DIM};
use crate::widgets::{StyledLine, TextBlockState};

/// Hint shown under the section body
pub const CONTENT_HINT: &str = "b back to shell • n/p sections • ↑/↓ scroll • q quit";

/// Which section is open and how far it is scrolled
#[derive(Debug)]
pub struct ContentView {
    active: usize,
    count: usize,
    /// Scroll state of the section body
    pub scroll: TextBlockState,
}

impl ContentView {
    /// View over `count` sections, starting at the first
    pub fn new(count: usize) -> Self {
        Self {
            active: 0,
            count,
            scroll: TextBlockState::top_anchored(),
        }
    }

    /// Index of the open section
    pub fn active(&self) -> usize {
        self.active
    }

    /// Open the next section, wrapping around
    pub fn next(&mut self) {
        if self.count > 0 {
            self.select((self.active + 1) % self.count);
        }
    }

    /// Open the previous section, wrapping around
    pub fn prev(&mut self) {
        if self.count > 0 {
            self.select((self.active + self.count - 1) % self.count);
        }
    }

    fn select(&mut self, index: usize) {
        self.active = index;
        self.scroll.scroll_to_top();
    }

    /// Back to the first section, scrolled to the top
    pub fn reset(&mut self) {
        self.select(0);
    }
}

/// One-line section navigation with the active entry highlighted
pub fn tabs(sections: &[Section], active: usize) -> StyledLine {
    let idle = Style::default().fg(MUTED_GRAY);
    let current = Style::default()
        .fg(ACCENT_CYAN)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);

    sections
        .iter()
        .enumerate()
        .fold(StyledLine::blank(), |line, (i, section)| {
            let style = if i == active { current } else { idle };
            line.span(format!(" {} ", section.title), style).span(" ", idle)
        })
}

/// Heading plus body of `section`
pub fn body(section: &Section) -> Vec<StyledLine> {
    let heading = Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD);
    let rule = "─".repeat(section.title.chars().count());

    let mut lines = vec![
        StyledLine::raw(section.title.as_str(), heading),
        StyledLine::raw(rule, Style::default().fg(PHOSPHOR_DIM)),
        StyledLine::blank(),
    ];
    lines.extend(section.lines.iter().map(String::as_str).map(StyledLine::markup));
    lines
}
