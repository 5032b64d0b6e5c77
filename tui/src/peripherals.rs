//! Simulated Peripherals
//!
//! Decorative hardware shown beside the content view: a 16x2 character LCD,
//! an 8x8 LED matrix, a watchdog uptime counter, a system status readout, a
//! memory-mapped register dump and an I2C bus scanner.
//!
//! Each peripheral is a small state machine driven by [`Peripherals::tick`]
//! with the frame delta. None of them affect the console; they only have to
//! render something plausible.

use std::time::Duration;

use bootfolio_core::profile::{I2cDevice, LcdMessage, Register};
use bootfolio_core::Profile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Characters per LCD row
pub const LCD_COLUMNS: usize = 16;

/// LED matrix edge length
pub const MATRIX_SIZE: usize = 8;

const LCD_PERIOD: Duration = Duration::from_secs(3);
const MATRIX_PERIOD: Duration = Duration::from_millis(200);
const WATCHDOG_PERIOD: Duration = Duration::from_secs(1);
const STATUS_PERIOD: Duration = Duration::from_secs(2);
const REGISTER_PERIOD: Duration = Duration::from_secs(3);
const SCAN_DURATION: Duration = Duration::from_secs(2);

/// Chance that a skill register moves on a refresh
const REGISTER_DRIFT_CHANCE: f64 = 0.2;

/// Counts whole periods out of accumulated frame time
#[derive(Clone, Debug)]
struct Ticker {
    period: Duration,
    carry: Duration,
}

impl Ticker {
    fn new(period: Duration) -> Self {
        Self {
            period,
            carry: Duration::ZERO,
        }
    }

    /// Number of periods completed by adding `delta`
    fn tick(&mut self, delta: Duration) -> u32 {
        self.carry += delta;
        let mut fired = 0;
        while self.carry >= self.period {
            self.carry -= self.period;
            fired += 1;
        }
        fired
    }
}

// ============================================================================
// LCD
// ============================================================================

/// 16x2 character display cycling through messages
#[derive(Clone, Debug)]
pub struct Lcd {
    messages: Vec<LcdMessage>,
    index: usize,
    ticker: Ticker,
}

impl Lcd {
    /// Create a display cycling `messages`
    pub fn new(messages: Vec<LcdMessage>) -> Self {
        Self {
            messages,
            index: 0,
            ticker: Ticker::new(LCD_PERIOD),
        }
    }

    fn tick(&mut self, delta: Duration) {
        let steps = self.ticker.tick(delta) as usize;
        if !self.messages.is_empty() {
            self.index = (self.index + steps) % self.messages.len();
        }
    }

    /// Index of the message on screen
    pub fn index(&self) -> usize {
        self.index
    }

    /// Both rows, padded or cut to exactly [`LCD_COLUMNS`] characters
    pub fn rows(&self) -> [String; 2] {
        match self.messages.get(self.index) {
            Some(msg) => [fit_lcd(&msg.top), fit_lcd(&msg.bottom)],
            None => [fit_lcd(""), fit_lcd("")],
        }
    }
}

fn fit_lcd(text: &str) -> String {
    let cut: String = text.chars().take(LCD_COLUMNS).collect();
    format!("{cut:<LCD_COLUMNS$}")
}

// ============================================================================
// LED Matrix
// ============================================================================

/// 8x8 matrix scrolling an X pattern sideways
#[derive(Clone, Debug)]
pub struct LedMatrix {
    scroll: usize,
    ticker: Ticker,
}

impl Default for LedMatrix {
    fn default() -> Self {
        Self {
            scroll: 0,
            ticker: Ticker::new(MATRIX_PERIOD),
        }
    }
}

impl LedMatrix {
    fn tick(&mut self, delta: Duration) {
        let steps = self.ticker.tick(delta) as usize;
        self.scroll = (self.scroll + steps) % (MATRIX_SIZE * 2);
    }

    /// Current scroll phase, `0..16`
    pub fn phase(&self) -> usize {
        self.scroll
    }

    /// Whether the LED at `row`, `col` is lit
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        let pos = (col + self.scroll) % (MATRIX_SIZE * 2);
        pos < MATRIX_SIZE && (pos == row || pos == MATRIX_SIZE - 1 - row)
    }
}

// ============================================================================
// Watchdog
// ============================================================================

/// Uptime counter that never resets
///
/// Months are 30 days and years are 12 months, like a cheap RTC.
#[derive(Clone, Debug)]
pub struct Watchdog {
    seconds: u64,
    health: f64,
    ticker: Ticker,
}

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 12 * MONTH;

impl Default for Watchdog {
    fn default() -> Self {
        Self {
            // 3y 4m 12d 05:23:10
            seconds: 3 * YEAR + 4 * MONTH + 12 * DAY + 5 * HOUR + 23 * MINUTE + 10,
            health: 98.0,
            ticker: Ticker::new(WATCHDOG_PERIOD),
        }
    }
}

impl Watchdog {
    fn tick(&mut self, delta: Duration, rng: &mut impl Rng) {
        for _ in 0..self.ticker.tick(delta) {
            self.seconds += 1;
            self.health = (self.health + rng.gen_range(-1.0..=1.0)).clamp(95.0, 100.0);
        }
    }

    /// Health percentage, `95..=100`
    pub fn health(&self) -> f64 {
        self.health
    }

    /// Uptime as `3y 04m 12d 05:23:10`
    pub fn uptime(&self) -> String {
        let s = self.seconds;
        format!(
            "{}y {:02}m {:02}d {:02}:{:02}:{:02}",
            s / YEAR,
            s % YEAR / MONTH,
            s % MONTH / DAY,
            s % DAY / HOUR,
            s % HOUR / MINUTE,
            s % MINUTE
        )
    }
}

// ============================================================================
// System Status
// ============================================================================

/// CPU and memory readout that wanders within fixed bounds
#[derive(Clone, Debug)]
pub struct SystemStatus {
    cpu: f64,
    memory: f64,
    ticker: Ticker,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self {
            cpu: 45.0,
            memory: 68.0,
            ticker: Ticker::new(STATUS_PERIOD),
        }
    }
}

impl SystemStatus {
    fn tick(&mut self, delta: Duration, rng: &mut impl Rng) {
        for _ in 0..self.ticker.tick(delta) {
            self.cpu = (self.cpu + rng.gen_range(-5.0..=5.0)).clamp(20.0, 80.0);
            self.memory = (self.memory + rng.gen_range(-2.5..=2.5)).clamp(40.0, 90.0);
        }
    }

    /// CPU load percentage
    pub fn cpu(&self) -> f64 {
        self.cpu
    }

    /// Memory use percentage
    pub fn memory(&self) -> f64 {
        self.memory
    }
}

// ============================================================================
// Register Dump
// ============================================================================

/// Memory-mapped registers whose skill values drift on each refresh
///
/// A refresh moves each `SKILL*` register by -1, 0 or +1 with a one in five
/// chance, keeping it within `70..=100`. Other registers hold still.
#[derive(Clone, Debug)]
pub struct RegisterDump {
    registers: Vec<Register>,
    ticker: Ticker,
}

impl RegisterDump {
    /// Create a dump of `registers`
    pub fn new(registers: Vec<Register>) -> Self {
        Self {
            registers,
            ticker: Ticker::new(REGISTER_PERIOD),
        }
    }

    fn tick(&mut self, delta: Duration, rng: &mut impl Rng) {
        for _ in 0..self.ticker.tick(delta) {
            for reg in self.registers.iter_mut().filter(|r| r.is_skill()) {
                if rng.gen_bool(REGISTER_DRIFT_CHANCE) {
                    let value = i16::from(reg.percentage) + rng.gen_range(-1..=1);
                    reg.percentage = value.clamp(70, 100) as u8;
                }
            }
        }
    }

    /// Current register contents
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }
}

// ============================================================================
// I2C Bus
// ============================================================================

/// I2C bus that lists its devices and can run a timed scan
#[derive(Clone, Debug)]
pub struct I2cBus {
    devices: Vec<I2cDevice>,
    scan_left: Option<Duration>,
}

impl I2cBus {
    /// Create a bus with `devices` attached
    pub fn new(devices: Vec<I2cDevice>) -> Self {
        Self {
            devices,
            scan_left: None,
        }
    }

    /// Start a scan unless one is running
    pub fn scan(&mut self) {
        if self.scan_left.is_none() {
            tracing::debug!(devices = self.devices.len(), "I2C scan started");
            self.scan_left = Some(SCAN_DURATION);
        }
    }

    fn tick(&mut self, delta: Duration) {
        if let Some(left) = self.scan_left {
            self.scan_left = left.checked_sub(delta).filter(|d| !d.is_zero());
        }
    }

    /// Whether a scan is in progress
    pub fn is_scanning(&self) -> bool {
        self.scan_left.is_some()
    }

    /// Devices answering on the bus
    pub fn devices(&self) -> &[I2cDevice] {
        &self.devices
    }
}

// ============================================================================
// All Peripherals
// ============================================================================

/// Everything on the hardware sidebar
#[derive(Debug)]
pub struct Peripherals {
    /// Character display
    pub lcd: Lcd,
    /// LED matrix
    pub matrix: LedMatrix,
    /// Uptime counter
    pub watchdog: Watchdog,
    /// CPU/memory readout
    pub status: SystemStatus,
    /// Register dump
    pub registers: RegisterDump,
    /// I2C bus scanner
    pub i2c: I2cBus,
    rng: StdRng,
}

impl Peripherals {
    /// Create peripherals showing the hardware payload of `profile`
    pub fn new(profile: &Profile) -> Self {
        Self::with_rng(profile, StdRng::from_entropy())
    }

    /// Create peripherals with a fixed random source
    pub fn with_rng(profile: &Profile, rng: StdRng) -> Self {
        Self {
            lcd: Lcd::new(profile.lcd.clone()),
            matrix: LedMatrix::default(),
            watchdog: Watchdog::default(),
            status: SystemStatus::default(),
            registers: RegisterDump::new(profile.registers.clone()),
            i2c: I2cBus::new(profile.i2c.clone()),
            rng,
        }
    }

    /// Advance every animation by `delta`
    pub fn tick(&mut self, delta: Duration) {
        self.lcd.tick(delta);
        self.matrix.tick(delta);
        self.watchdog.tick(delta, &mut self.rng);
        self.status.tick(delta, &mut self.rng);
        self.registers.tick(delta, &mut self.rng);
        self.i2c.tick(delta);
    }
}
