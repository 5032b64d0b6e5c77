//! Boot screen
//!
//! Banner, status lines as they are revealed, then the confirmation prompt.

use bootfolio_core::boot::LOADING_SYMBOL;
use bootfolio_core::profile::Identity;
use bootfolio_core::{BootSequence, BootStatus, LineState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme::{
    ACCENT_CYAN, MUTED_GRAY, PHOSPHOR, PHOSPHOR_DIM, STATUS_ERR, STATUS_OK, STATUS_WARN,
};
use crate::widgets::StyledLine;

/// Dot-art banner
pub const BANNER: &[&str] = &[
    "  •••••••                  ••••••   ",
    " ••     ••               •••     •• ",
    "•••     ••••            •••        ••",
    "•••       •••            •••        •••",
    "•••       •••            •••        •••",
    "•••      •••             •••       •••",
    " ••     •••                ••     •••",
    "  ••••••                   ••••••    ",
    "",
    "•• •                                   ••••",
    " •••                              ••••",
    " •• •• •• ••• ••• ••• ••• •••  • •••",
    "   •• •• ••• ••• ••• ••• •••  •• •",
    "   • •• ••• ••• ••• ••• •••   ••",
    "     ••    •           •    ••",
    "       ••                  •",
    "         • •  ••   ••  •• •",
];

/// Boot screen split into its three blocks
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BootScreen {
    /// Banner, name and tagline (centered)
    pub header: Vec<StyledLine>,
    /// Revealed status lines (left-aligned as a block)
    pub messages: Vec<StyledLine>,
    /// Prompt and confirmation (centered)
    pub footer: Vec<StyledLine>,
}

fn status_color(status: BootStatus) -> Style {
    let color = match status {
        BootStatus::Ok => STATUS_OK,
        BootStatus::Warning => STATUS_WARN,
        BootStatus::Error => STATUS_ERR,
    };
    Style::default().fg(color)
}

impl BootScreen {
    /// Build the screen for the current boot state
    pub fn build(boot: &BootSequence, identity: &Identity) -> Self {
        let accent = Style::default().fg(ACCENT_CYAN);
        let muted = Style::default().fg(MUTED_GRAY);
        let text = Style::default().fg(PHOSPHOR);

        let mut header: Vec<StyledLine> = BANNER.iter().map(|l| StyledLine::raw(*l, accent)).collect();
        header.push(StyledLine::blank());
        header.push(StyledLine::raw(
            identity.banner_name.as_str(),
            accent.add_modifier(Modifier::BOLD),
        ));
        header.push(StyledLine::raw(identity.tagline.as_str(), muted));

        let messages = boot
            .lines()
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let (symbol, style, label) = match boot.line_state(i) {
                    LineState::Hidden => return None,
                    LineState::Loading => (LOADING_SYMBOL, muted, None),
                    LineState::Completed(status) => {
                        (status.symbol(), status_color(status), Some(status.label()))
                    }
                };
                let mut row = StyledLine::raw("[", muted)
                    .span(symbol, style)
                    .span("] ", muted)
                    .span(line.text.as_str(), text);
                if let Some(label) = label {
                    row = row.span(format!(" {label}"), style);
                }
                Some(row)
            })
            .collect();

        let mut footer = Vec::new();
        if boot.prompt_visible() {
            footer.push(StyledLine::raw("Boot sequence complete.", accent));
            footer.push(StyledLine::raw("Press Enter to load kernel →", text));
            footer.push(StyledLine::raw(
                "or accept boot command.",
                Style::default().fg(PHOSPHOR_DIM),
            ));
        }
        if boot.is_confirmed() {
            footer.push(StyledLine::blank());
            footer.push(StyledLine::raw("Loading kernel...", accent));
        }

        Self {
            header,
            messages,
            footer,
        }
    }

    /// Draw into `area`, vertically centered when it fits
    pub fn render(&self, buf: &mut Buffer, area: Rect) {
        let gap = 1;
        let total = self.header.len() + gap + self.boot_rows() + gap + self.footer.len();
        let height = usize::from(area.height);
        let mut y = area.y + to_u16(height.saturating_sub(total) / 2);
        let bottom = area.y + area.height;

        for line in &self.header {
            render_centered(buf, area, y, line);
            y += 1;
        }
        y += to_u16(gap);

        let block_width = self.messages.iter().map(StyledLine::width).max().unwrap_or(0);
        let block_x = area.x + to_u16(usize::from(area.width).saturating_sub(block_width) / 2);
        for line in &self.messages {
            if y >= bottom {
                return;
            }
            line.render(buf, block_x, y, area.right().saturating_sub(block_x));
            y += 1;
        }
        // keep the footer from jumping while lines reveal
        y += to_u16(self.boot_rows().saturating_sub(self.messages.len()) + gap);

        for line in &self.footer {
            render_centered(buf, area, y, line);
            y += 1;
        }
    }

    fn boot_rows(&self) -> usize {
        self.messages.len().max(5)
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Draw `line` centered on row `y` of `area`
pub(crate) fn render_centered(buf: &mut Buffer, area: Rect, y: u16, line: &StyledLine) {
    if y < area.y || y >= area.bottom() {
        return;
    }
    let x = area.x + to_u16(usize::from(area.width).saturating_sub(line.width()) / 2);
    line.render(buf, x, y, area.right().saturating_sub(x));
}
