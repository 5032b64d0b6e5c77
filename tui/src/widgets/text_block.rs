//! TextBlock Widget
//!
//! A borderless, scrollable region of styled lines.
//!
//! Lines come from core output (tone markup) or are built from raw spans.
//! Single-style lines word-wrap; mixed-style lines (tables, skill bars)
//! wrap by column so their alignment survives.

use bootfolio_core::{markup, Tone};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::tone_style;

/// One display line made of styled spans
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyledLine {
    spans: Vec<(String, Style)>,
}

impl StyledLine {
    /// An empty line
    pub fn blank() -> Self {
        Self::default()
    }

    /// A single span, taken literally (no markup parsing)
    pub fn raw(text: impl Into<String>, style: Style) -> Self {
        Self::blank().span(text, style)
    }

    /// A line carrying `{tone|text}` markup
    pub fn markup(line: &str) -> Self {
        Self::markup_with(line, tone_style(Tone::Plain))
    }

    /// A markup line whose untagged text uses `plain`
    pub fn markup_with(line: &str, plain: Style) -> Self {
        markup::parse(line).into_iter().fold(Self::blank(), |acc, seg| {
            let style = match seg.tone {
                Tone::Plain => plain,
                tone => tone_style(tone),
            };
            acc.span(seg.text, style)
        })
    }

    /// Append a span
    #[must_use]
    pub fn span(mut self, text: impl Into<String>, style: Style) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push((text, style));
        }
        self
    }

    /// The spans in order
    pub fn spans(&self) -> &[(String, Style)] {
        &self.spans
    }

    /// Text without styling
    pub fn text(&self) -> String {
        self.spans.iter().map(|(t, _)| t.as_str()).collect()
    }

    /// Display width in terminal columns
    pub fn width(&self) -> usize {
        self.spans.iter().map(|(t, _)| t.width()).sum()
    }

    /// Split into lines no wider than `width`
    pub fn wrap(&self, width: usize) -> Vec<StyledLine> {
        if width == 0 || self.width() <= width {
            return vec![self.clone()];
        }

        match self.spans.as_slice() {
            [(text, style)] => wrap(text, width)
                .into_iter()
                .map(|part| Self::raw(part.into_owned(), *style))
                .collect(),
            _ => self.wrap_columns(width),
        }
    }

    fn wrap_columns(&self, width: usize) -> Vec<StyledLine> {
        let mut rows = Vec::new();
        let mut row = Self::blank();
        let mut used = 0;

        for (text, style) in &self.spans {
            let mut chunk = String::new();
            for c in text.chars() {
                let w = c.width().unwrap_or(0);
                if used + w > width && used > 0 {
                    row = row.span(std::mem::take(&mut chunk), *style);
                    rows.push(std::mem::take(&mut row));
                    used = 0;
                }
                chunk.push(c);
                used += w;
            }
            row = row.span(chunk, *style);
        }
        rows.push(row);
        rows
    }

    /// Draw at `x`, `y`, cutting at `max_width` columns
    pub fn render(&self, buf: &mut Buffer, x: u16, y: u16, max_width: u16) {
        let end = x.saturating_add(max_width);
        let mut cursor = x;
        for (text, style) in &self.spans {
            if cursor >= end {
                break;
            }
            let (next, _) = buf.set_stringn(cursor, y, text, usize::from(end - cursor), *style);
            cursor = next;
        }
    }
}

/// State for a scrollable text block
#[derive(Debug)]
pub struct TextBlockState {
    /// Scroll offset (lines from top)
    pub scroll_offset: usize,
    /// Total wrapped lines at the last render
    pub total_lines: usize,
    /// Rows visible at the last render
    pub viewport: usize,
    /// Keep the newest line in view
    pub follow_tail: bool,
}

impl Default for TextBlockState {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            total_lines: 0,
            viewport: 0,
            follow_tail: true,
        }
    }
}

impl TextBlockState {
    /// State that starts at the top and stays there until scrolled
    pub fn top_anchored() -> Self {
        Self {
            follow_tail: false,
            ..Self::default()
        }
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport)
    }

    /// Scroll by delta (positive = down)
    pub fn scroll(&mut self, delta: isize) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add_signed(delta)
            .min(self.max_scroll());
        self.follow_tail = self.scroll_offset >= self.max_scroll();
    }

    /// Scroll by one viewport
    pub fn page(&mut self, down: bool) {
        let page = isize::try_from(self.viewport.max(1)).unwrap_or(isize::MAX);
        self.scroll(if down { page } else { -page });
    }

    /// Scroll to top
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
        self.follow_tail = false;
    }

    /// Scroll to bottom and keep following new lines
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
        self.follow_tail = true;
    }

    /// Lines hidden below the viewport
    pub fn lines_below(&self) -> usize {
        self.max_scroll().saturating_sub(self.scroll_offset)
    }
}

/// A borderless, scrollable block of styled lines
pub struct TextBlock<'a> {
    lines: &'a [StyledLine],
}

impl<'a> TextBlock<'a> {
    /// Block over `lines`
    pub fn new(lines: &'a [StyledLine]) -> Self {
        Self { lines }
    }
}

impl StatefulWidget for TextBlock<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let wrapped: Vec<StyledLine> = self
            .lines
            .iter()
            .flat_map(|line| line.wrap(usize::from(area.width)))
            .collect();

        state.total_lines = wrapped.len();
        state.viewport = usize::from(area.height);

        if state.follow_tail {
            state.scroll_offset = state.max_scroll();
        } else {
            state.scroll_offset = state.scroll_offset.min(state.max_scroll());
        }

        for (row, line) in (area.y..area.y + area.height).zip(wrapped.iter().skip(state.scroll_offset)) {
            line.render(buf, area.x, row, area.width);
        }
    }
}
