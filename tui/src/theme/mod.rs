//! Theme and Colors
//!
//! Bootfolio's phosphor palette - a green-screen terminal with a cyan accent.
//!
//! Output lines carry semantic tones (see [`bootfolio_core::markup`]); this
//! module is the only place those tones become colors.

use bootfolio_core::Tone;
use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Terminal Palette
// ============================================================================

/// Main phosphor green
pub const PHOSPHOR: Color = Color::Rgb(80, 250, 123);

/// Dimmed phosphor for secondary text
pub const PHOSPHOR_DIM: Color = Color::Rgb(40, 140, 70);

/// Accent cyan (headings, banners, skill bars)
pub const ACCENT_CYAN: Color = Color::Rgb(110, 220, 255);

/// Prompt color
pub const PROMPT_GREEN: Color = Color::Rgb(130, 220, 130);

/// Muted gray for hints and separators
pub const MUTED_GRAY: Color = Color::Rgb(110, 110, 110);

// ============================================================================
// Status Colors
// ============================================================================

/// OK status
pub const STATUS_OK: Color = Color::Rgb(120, 230, 120);

/// Warning status
pub const STATUS_WARN: Color = Color::Rgb(255, 210, 90);

/// Error status
pub const STATUS_ERR: Color = Color::Rgb(255, 80, 80);

// ============================================================================
// Peripheral Colors
// ============================================================================

/// LCD backlight
pub const LCD_BACKLIGHT: Color = Color::Rgb(30, 60, 20);

/// LCD characters
pub const LCD_TEXT: Color = Color::Rgb(170, 255, 120);

/// Lit LED
pub const LED_ON: Color = Color::Rgb(255, 60, 60);

/// Unlit LED
pub const LED_OFF: Color = Color::Rgb(60, 20, 20);

/// Style for text carrying `tone`
#[must_use]
pub fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Plain => Style::default().fg(PHOSPHOR),
        Tone::Accent => Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD),
        Tone::Ok => Style::default().fg(STATUS_OK),
        Tone::Warn => Style::default().fg(STATUS_WARN),
        Tone::Err => Style::default().fg(STATUS_ERR),
        Tone::Muted => Style::default().fg(MUTED_GRAY),
    }
}
