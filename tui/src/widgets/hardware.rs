//! Hardware Panel Widget
//!
//! Renders the simulated peripherals as a narrow sidebar. The LCD always sits
//! on top; the space below it is one [`Bay`] at a time.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::peripherals::{Peripherals, LCD_COLUMNS, MATRIX_SIZE};
use crate::theme::{
    ACCENT_CYAN, LCD_BACKLIGHT, LCD_TEXT, LED_OFF, LED_ON, MUTED_GRAY, PHOSPHOR, STATUS_OK,
    STATUS_WARN,
};

/// Columns the panel needs to draw without clipping
pub const PANEL_WIDTH: u16 = 24;

/// What the sidebar shows under the LCD
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Bay {
    /// LED matrix, watchdog and status
    #[default]
    Board,
    /// Register dump
    Registers,
    /// I2C bus
    I2c,
}

impl Bay {
    /// The bay after this one, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Bay::Board => Bay::Registers,
            Bay::Registers => Bay::I2c,
            Bay::I2c => Bay::Board,
        }
    }
}

/// Sidebar with the LCD and one bay of peripherals
pub struct HardwarePanel<'a> {
    peripherals: &'a Peripherals,
    bay: Bay,
}

impl<'a> HardwarePanel<'a> {
    /// Panel showing `peripherals` with the board bay open
    pub fn new(peripherals: &'a Peripherals) -> Self {
        Self {
            peripherals,
            bay: Bay::default(),
        }
    }

    /// Open `bay` below the LCD
    #[must_use]
    pub fn bay(mut self, bay: Bay) -> Self {
        self.bay = bay;
        self
    }
}

impl Widget for HardwarePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }

        let heading = Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD);
        let label = Style::default().fg(MUTED_GRAY);
        let value = Style::default().fg(PHOSPHOR);
        let bottom = area.y + area.height;
        let x = area.x + 1;
        let mut y = area.y;

        let line = |buf: &mut Buffer, y: &mut u16, text: &str, style: Style| {
            if *y < bottom {
                buf.set_stringn(x, *y, text, usize::from(area.width.saturating_sub(1)), style);
                *y += 1;
            }
        };

        // LCD
        let rule = "─".repeat(LCD_COLUMNS);
        let lcd_style = Style::default().fg(LCD_TEXT).bg(LCD_BACKLIGHT);
        line(buf, &mut y, "LCD0 16x2", heading);
        line(buf, &mut y, &format!("┌{rule}┐"), label);
        for row in self.peripherals.lcd.rows() {
            if y < bottom {
                buf.set_string(x, y, "│", label);
                buf.set_stringn(x + 1, y, &row, LCD_COLUMNS, lcd_style);
                let right = x.saturating_add(u16::try_from(LCD_COLUMNS).unwrap_or(u16::MAX) + 1);
                buf.set_string(right, y, "│", label);
                y += 1;
            }
        }
        line(buf, &mut y, &format!("└{rule}┘"), label);
        line(buf, &mut y, "", label);

        match self.bay {
            Bay::Board => {
                // LED matrix
                line(buf, &mut y, "LED0 8x8", heading);
                for row in 0..MATRIX_SIZE {
                    if y >= bottom {
                        break;
                    }
                    for col in 0..MATRIX_SIZE {
                        let lit = self.peripherals.matrix.is_lit(row, col);
                        let (glyph, color) = if lit { ("●", LED_ON) } else { ("·", LED_OFF) };
                        let cx = x + u16::try_from(col * 2).unwrap_or(u16::MAX);
                        if cx < area.x + area.width {
                            buf.set_string(cx, y, glyph, Style::default().fg(color));
                        }
                    }
                    y += 1;
                }
                line(buf, &mut y, "", label);

                // Watchdog
                let watchdog = &self.peripherals.watchdog;
                line(buf, &mut y, "WDT0 watchdog", heading);
                line(buf, &mut y, &format!("up  {}", watchdog.uptime()), value);
                line(
                    buf,
                    &mut y,
                    &format!("hp  {:.1}%", watchdog.health()),
                    Style::default().fg(STATUS_OK),
                );
                line(buf, &mut y, "", label);

                // Status
                let status = &self.peripherals.status;
                line(buf, &mut y, "SYS status", heading);
                line(buf, &mut y, &format!("CPU {:>3.0}%", status.cpu()), value);
                line(buf, &mut y, &format!("MEM {:>3.0}%", status.memory()), value);
            }
            Bay::Registers => {
                line(buf, &mut y, "REG0 0x20001000", heading);
                for reg in self.peripherals.registers.registers() {
                    let style = if reg.is_skill() { value } else { label };
                    line(
                        buf,
                        &mut y,
                        &format!("{:<14} {:02X} {:>3}%", reg.name, reg.percentage, reg.percentage),
                        style,
                    );
                }
            }
            Bay::I2c => {
                let bus = &self.peripherals.i2c;
                line(buf, &mut y, "I2C0 400kHz", heading);
                if bus.is_scanning() {
                    line(buf, &mut y, "scanning...", Style::default().fg(STATUS_WARN));
                } else {
                    line(
                        buf,
                        &mut y,
                        &format!("online  {} dev", bus.devices().len()),
                        Style::default().fg(STATUS_OK),
                    );
                }
                line(buf, &mut y, "", label);
                for device in bus.devices() {
                    line(buf, &mut y, &format!("0x{:02X} {}", device.address, device.name), value);
                    line(buf, &mut y, &format!("     [{}]", device.status), label);
                }
            }
        }
    }
}
