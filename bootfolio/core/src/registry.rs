//! Command Registry
//!
//! A flat, total mapping from normalized command text to a handler that
//! produces output lines and at most one side effect.
//!
//! # Design Philosophy
//!
//! There is no parser. Input is trimmed and lower-cased, then matched exactly
//! against registered keys. Every input maps to *some* result: empty input
//! yields nothing, unknown input yields a fixed two-line diagnostic. Handlers
//! never mutate session state themselves; they describe what should happen
//! via [`SideEffect`] and the caller applies it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::history::HistoryBuffer;
use crate::markup::{self, Tone};
use crate::profile::Profile;

/// What the caller must do after displaying a result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideEffect {
    /// Nothing beyond recording the entry
    #[default]
    None,
    /// Empty the history instead of recording an entry
    ClearHistory,
    /// Record the entry, then leave the shell stage
    RequestStageTransition,
}

/// Result of a registry lookup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupResult {
    /// Output lines (may carry tone markup)
    pub lines: Vec<String>,
    /// Side effect requested by the handler
    pub effect: SideEffect,
}

impl LookupResult {
    /// No output, no effect
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Plain output with no side effect
    #[must_use]
    pub fn output(lines: Vec<String>) -> Self {
        Self {
            lines,
            effect: SideEffect::None,
        }
    }

    /// The diagnostic for input that matched nothing
    ///
    /// The echoed input is markup-escaped, so [`markup::strip`] recovers it
    /// verbatim.
    #[must_use]
    pub fn not_found(trimmed_input: &str) -> Self {
        Self::output(vec![
            format!("bash: {}: command not found", markup::escape(trimmed_input)),
            "Type \"help\" for available commands".to_string(),
        ])
    }

    /// Attach a side effect
    #[must_use]
    pub fn with_effect(mut self, effect: SideEffect) -> Self {
        self.effect = effect;
        self
    }
}

/// Read-only live state a handler may consult
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandContext<'a> {
    history: Option<&'a HistoryBuffer>,
}

impl<'a> CommandContext<'a> {
    /// Context backed by a session's history
    #[must_use]
    pub fn new(history: &'a HistoryBuffer) -> Self {
        Self {
            history: Some(history),
        }
    }

    /// Inputs currently held in history, oldest first
    pub fn history_inputs(&self) -> impl Iterator<Item = &'a str> {
        self.history.into_iter().flat_map(HistoryBuffer::inputs)
    }
}

/// A registered handler
pub type Handler = Box<dyn Fn(&CommandContext<'_>) -> LookupResult + Send + Sync>;

/// Normalized command text → handler
#[derive(Default)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("keys", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Normalize raw input the way lookups do
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl CommandRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under the normalized form of `key`
    ///
    /// A later registration for the same key replaces the earlier one.
    pub fn register<F>(&mut self, key: &str, handler: F)
    where
        F: Fn(&CommandContext<'_>) -> LookupResult + Send + Sync + 'static,
    {
        self.handlers.insert(normalize(key), Box::new(handler));
    }

    /// Register a handler that always prints the same lines
    pub fn register_static(&mut self, key: &str, lines: Vec<String>) {
        self.register(key, move |_| LookupResult::output(lines.clone()));
    }

    /// Resolve raw input to a result
    #[must_use]
    pub fn lookup(&self, raw_input: &str, ctx: &CommandContext<'_>) -> LookupResult {
        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            return LookupResult::empty();
        }

        match self.handlers.get(&normalize(trimmed)) {
            Some(handler) => handler(ctx),
            None => {
                tracing::debug!(input = %trimmed, "Unknown command");
                LookupResult::not_found(trimmed)
            }
        }
    }

    /// Whether raw input names a registered command
    #[must_use]
    pub fn contains(&self, raw_input: &str) -> bool {
        self.handlers.contains_key(&normalize(raw_input))
    }

    /// Registered keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Keys that start with the normalized form of `prefix`
    #[must_use]
    pub fn completions(&self, prefix: &str) -> Vec<&str> {
        let prefix = normalize(prefix);
        self.keys().filter(|k| k.starts_with(&prefix)).collect()
    }

    /// Number of registered commands
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no commands are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The shell's built-in command set, with payloads taken from `profile`
    #[must_use]
    pub fn builtin(profile: &Profile) -> Self {
        let mut registry = Self::new();

        registry.register_static("ls", listing_lines());
        registry.register_static("help", help_lines());
        registry.register_static("cat help", help_lines());
        registry.register_static("cat registers", register_lines(profile));
        registry.register_static("cat i2c", i2c_lines(profile));
        registry.register_static("cat watchdog", watchdog_lines());
        registry.register_static("cat peripherals", peripheral_lines(profile));
        registry.register_static("cat experience", experience_lines(profile));
        registry.register_static("cat skills", skill_lines(profile));
        registry.register_static("cat thesis", profile.thesis.lines.clone());
        registry.register_static("contact", profile.contact.lines.clone());
        registry.register_static("cat contact", profile.contact.lines.clone());
        registry.register_static(
            "whoami",
            vec![profile.identity.name.clone(), profile.identity.headline.clone()],
        );

        let table = project_table_lines(profile);
        registry.register_static("run projects", table.clone());
        registry.register_static("cat projects", table);
        for project in &profile.projects {
            registry.register_static(
                &format!("cat projects/{}", project.id),
                vec![
                    markup::tag(Tone::Accent, &format!("Project {}: {}", project.id, project.name)),
                    String::new(),
                    format!("Description: {}", project.description),
                    format!("Tech:        {}", project.tech),
                ],
            );
        }

        registry.register("clear", |_| LookupResult::empty().with_effect(SideEffect::ClearHistory));

        registry.register("history", |ctx| {
            LookupResult::output(
                ctx.history_inputs()
                    .enumerate()
                    .map(|(i, input)| format!("{}: {}", i + 1, markup::escape(input)))
                    .collect(),
            )
        });

        for key in ["userland", "start userland"] {
            registry.register(key, |_| {
                LookupResult::output(vec![
                    markup::tag(Tone::Accent, "Starting userland..."),
                    "Mounting peripherals: lcd0 led0 wdt0 i2c0 reg0".to_string(),
                ])
                .with_effect(SideEffect::RequestStageTransition)
            });
        }

        tracing::debug!(commands = registry.len(), "Built command registry");
        registry
    }
}

fn listing_lines() -> Vec<String> {
    vec![
        "projects/   experience/   skills/   thesis/   contact/".to_string(),
        "peripherals/   registers/   watchdog/   i2c/   help/".to_string(),
    ]
}

fn help_lines() -> Vec<String> {
    [
        "Available commands:",
        "  ls                    - list directories",
        "  cat <directory>       - display directory contents",
        "  run projects          - show project portfolio",
        "  userland              - launch embedded peripherals",
        "  clear                 - clear terminal",
        "  history               - show command history",
        "  contact               - display contact information",
        "  whoami                - show who this system belongs to",
        "",
        "Navigation:",
        "  ↑/↓ arrows           - command history",
        "  Tab                   - autocomplete (basic)",
        "  Ctrl+C                - cancel current input",
        "",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

fn experience_lines(profile: &Profile) -> Vec<String> {
    profile
        .experience
        .iter()
        .flat_map(|exp| {
            std::iter::once(format!("[{}] {}", exp.period, exp.title))
                .chain(exp.details.iter().cloned())
                .chain(std::iter::once(String::new()))
        })
        .collect()
}

fn skill_lines(profile: &Profile) -> Vec<String> {
    let mut lines = vec!["Technical Skills Profile:".to_string(), String::new()];
    lines.extend(profile.skills.iter().map(|skill| {
        let bar = "█".repeat(usize::from(skill.level / 10));
        format!(
            "{:<20} {}{}%",
            skill.name,
            markup::tag(Tone::Accent, &bar),
            skill.level
        )
    }));
    lines
}

/// Base of the register window every dump is printed against
const REGISTER_BASE: u32 = 0x2000_1000;

fn register_lines(profile: &Profile) -> Vec<String> {
    let mut lines = vec![
        markup::tag(Tone::Accent, "Memory-Mapped Registers"),
        String::new(),
    ];
    lines.extend(profile.registers.iter().map(|reg| {
        format!(
            "0x{:08X}: {}  {:<16} {} ({}%)",
            reg.address,
            markup::tag(Tone::Accent, &format!("0x{:02X}", reg.percentage)),
            reg.name,
            reg.description,
            reg.percentage
        )
    }));
    lines.push(String::new());
    lines.push(format!("Base Address: 0x{REGISTER_BASE:08X}"));
    lines.push(format!(
        "Access: Read-Only | Word Size: 8-bit | Total Registers: {}",
        profile.registers.len()
    ));
    lines
}

fn i2c_lines(profile: &Profile) -> Vec<String> {
    let mut lines = vec![
        markup::tag(Tone::Accent, "I2C Bus Scanner"),
        String::new(),
        format!("Bus Status: {}", markup::tag(Tone::Ok, "Online")),
        "Clock Speed: 400kHz (Fast Mode)".to_string(),
        format!("Devices Found: {}", profile.i2c.len()),
        String::new(),
    ];
    for device in &profile.i2c {
        lines.push(format!(
            "0x{:02X}  {:<24} {}",
            device.address,
            device.name,
            markup::tag(Tone::Ok, &format!("[{}]", device.status))
        ));
        lines.push(format!("      {}", device.description));
        lines.push(format!("      Project: {}", device.project));
        lines.push(format!("      {}", device.details));
        lines.push(String::new());
    }
    lines
}

fn watchdog_lines() -> Vec<String> {
    [
        "Watchdog Timer (wdt0)",
        "",
        "Timeout:  1000 ms",
        "Health:   95-100% nominal",
        "Status:   armed, kicked every second while userland runs",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

fn peripheral_lines(profile: &Profile) -> Vec<String> {
    vec![
        "Mounted in userland:".to_string(),
        format!("  lcd0   16x2 character display ({} messages)", profile.lcd.len()),
        "  led0   8x8 LED matrix".to_string(),
        "  wdt0   watchdog timer".to_string(),
        format!("  i2c0   I2C bus ({} devices)", profile.i2c.len()),
        format!("  reg0   register dump ({} registers)", profile.registers.len()),
        String::new(),
        "Type \"userland\" to mount them.".to_string(),
    ]
}

fn project_table_lines(profile: &Profile) -> Vec<String> {
    const BORDER: &str = "+----+--------------------------------------+-----------------+";

    let mut lines = vec![
        BORDER.to_string(),
        "| #  | Project Name                         | Status          |".to_string(),
        BORDER.to_string(),
    ];
    lines.extend(profile.projects.iter().map(|p| {
        format!(
            "| {} | {:<36} | {}      |",
            p.id,
            p.name,
            markup::tag(Tone::Ok, "[DEPLOYED]")
        )
    }));
    lines.push(BORDER.to_string());
    lines.push(String::new());
    lines.push("Use \"cat projects/<id>\" for detailed information".to_string());
    lines
}
