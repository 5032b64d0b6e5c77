//! Console Configuration
//!
//! Timing constants and paths for the console, loaded from an optional TOML
//! file at `~/.config/bootfolio/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [boot]
//! initial_delay_ms = 1500
//! prompt_delay_ms = 1000
//! confirm_delay_ms = 500
//! skip = false
//!
//! [shell]
//! prompt = "user@portfolio:~$"
//! grace_delay_ms = 500
//!
//! [profile]
//! path = "/home/me/my-profile.toml"
//! ```
//!
//! # Environment Variables
//!
//! | Variable                   | Field                 |
//! |----------------------------|-----------------------|
//! | `BOOTFOLIO_SKIP_BOOT`      | `skip_boot`           |
//! | `BOOTFOLIO_BOOT_INITIAL_MS`| `boot.initial_delay`  |
//! | `BOOTFOLIO_GRACE_MS`       | `grace_delay`         |
//! | `BOOTFOLIO_PROMPT`         | `prompt`              |
//! | `BOOTFOLIO_PROFILE`        | `profile_path`        |

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boot::BootTimings;
use crate::session::DEFAULT_PROMPT;

/// Longest delay any single timer may be configured with
pub const MAX_DELAY: Duration = Duration::from_secs(60);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[boot]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootToml {
    /// Delay before the first boot line, in milliseconds
    pub initial_delay_ms: Option<u64>,

    /// Delay between the last line and the prompt, in milliseconds
    pub prompt_delay_ms: Option<u64>,

    /// Delay between confirmation and the shell, in milliseconds
    pub confirm_delay_ms: Option<u64>,

    /// Start directly in the shell
    pub skip: Option<bool>,
}

/// `[shell]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellToml {
    /// Prompt text
    pub prompt: Option<String>,

    /// Delay between the exit command and the content view, in milliseconds
    pub grace_delay_ms: Option<u64>,
}

/// `[profile]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileToml {
    /// Path to a profile TOML replacing the built-in content
    pub path: Option<PathBuf>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootfolioToml {
    /// Boot section
    pub boot: BootToml,

    /// Shell section
    pub shell: ShellToml,

    /// Profile section
    pub profile: ProfileToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved console configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Boot screen delays
    pub boot: BootTimings,

    /// Delay between the exit command and the content view
    pub grace_delay: Duration,

    /// Start in the shell instead of the boot screen
    pub skip_boot: bool,

    /// Shell prompt text
    pub prompt: String,

    /// Profile to load instead of the built-in one
    pub profile_path: Option<PathBuf>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            boot: BootTimings::default(),
            grace_delay: Duration::from_millis(500),
            skip_boot: false,
            prompt: DEFAULT_PROMPT.to_string(),
            profile_path: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ConsoleConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check values that parse fine but cannot be used
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty prompt or a
    /// delay above [`MAX_DELAY`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "prompt must not be empty".to_string(),
            ));
        }

        let delays = [
            ("boot.initial_delay", self.boot.initial_delay),
            ("boot.prompt_delay", self.boot.prompt_delay),
            ("boot.confirm_delay", self.boot.confirm_delay),
            ("shell.grace_delay", self.grace_delay),
        ];
        for (name, delay) in delays {
            if delay > MAX_DELAY {
                return Err(ConfigError::ValidationError(format!(
                    "{name} of {}ms exceeds {}ms",
                    delay.as_millis(),
                    MAX_DELAY.as_millis()
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/bootfolio/config.toml` or
/// `~/.config/bootfolio/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("bootfolio").join("config.toml"))
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ConsoleConfig, ConfigError> {
    let mut config = ConsoleConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: BootfolioToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config);
    config.validate()?;

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ConsoleConfig, toml: &BootfolioToml) {
    if let Some(ms) = toml.boot.initial_delay_ms {
        config.boot.initial_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.boot.prompt_delay_ms {
        config.boot.prompt_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.boot.confirm_delay_ms {
        config.boot.confirm_delay = Duration::from_millis(ms);
    }
    if let Some(skip) = toml.boot.skip {
        config.skip_boot = skip;
    }

    if let Some(ref prompt) = toml.shell.prompt {
        config.prompt.clone_from(prompt);
    }
    if let Some(ms) = toml.shell.grace_delay_ms {
        config.grace_delay = Duration::from_millis(ms);
    }

    if toml.profile.path.is_some() {
        config.profile_path.clone_from(&toml.profile.path);
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut ConsoleConfig) {
    apply_env_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides read through `lookup` (a stand-in for `std::env::var`)
///
/// A variable set to an empty or blank value counts as unset.
fn apply_env_from<F>(config: &mut ConsoleConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(skip) = lookup("BOOTFOLIO_SKIP_BOOT") {
        config.skip_boot = skip != "0" && skip.to_lowercase() != "false";
        config.source = ConfigSource::Env;
    }
    if let Some(initial) = lookup("BOOTFOLIO_BOOT_INITIAL_MS") {
        if let Ok(ms) = initial.parse::<u64>() {
            config.boot.initial_delay = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(grace) = lookup("BOOTFOLIO_GRACE_MS") {
        if let Ok(ms) = grace.parse::<u64>() {
            config.grace_delay = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(prompt) = lookup("BOOTFOLIO_PROMPT") {
        config.prompt = prompt;
        config.source = ConfigSource::Env;
    }
    if let Some(path) = lookup("BOOTFOLIO_PROFILE") {
        config.profile_path = Some(PathBuf::from(path));
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Configuration overrides from CLI arguments
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Skip boot override
    pub skip_boot: Option<bool>,

    /// Profile path override
    pub profile_path: Option<PathBuf>,

    /// Grace delay override (milliseconds)
    pub grace_delay_ms: Option<u64>,

    /// Prompt override
    pub prompt: Option<String>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set skip boot override
    #[must_use]
    pub fn with_skip_boot(mut self, skip: bool) -> Self {
        self.skip_boot = Some(skip);
        self
    }

    /// Set profile path override
    #[must_use]
    pub fn with_profile_path(mut self, path: PathBuf) -> Self {
        self.profile_path = Some(path);
        self
    }

    /// Set grace delay override
    #[must_use]
    pub fn with_grace_delay_ms(mut self, ms: u64) -> Self {
        self.grace_delay_ms = Some(ms);
        self
    }

    /// Set prompt override
    #[must_use]
    pub fn with_prompt(mut self, prompt: String) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skip_boot.is_none()
            && self.profile_path.is_none()
            && self.grace_delay_ms.is_none()
            && self.prompt.is_none()
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut ConsoleConfig) {
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }

        if let Some(skip) = self.skip_boot {
            config.skip_boot = skip;
        }
        if let Some(ref path) = self.profile_path {
            config.profile_path = Some(path.clone());
        }
        if let Some(ms) = self.grace_delay_ms {
            config.grace_delay = Duration::from_millis(ms);
        }
        if let Some(ref prompt) = self.prompt {
            config.prompt.clone_from(prompt);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // =========================================================================
    // Default Configuration Tests
    // =========================================================================

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();

        assert_eq!(config.boot.initial_delay, Duration::from_millis(1500));
        assert_eq!(config.boot.prompt_delay, Duration::from_millis(1000));
        assert_eq!(config.boot.confirm_delay, Duration::from_millis(500));
        assert_eq!(config.grace_delay, Duration::from_millis(500));
        assert!(!config.skip_boot);
        assert_eq!(config.prompt, "user@portfolio:~$");
        assert_eq!(config.profile_path, None);
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("bootfolio/config.toml"));
        }
    }

    // =========================================================================
    // TOML Parsing Tests
    // =========================================================================

    #[test]
    fn test_toml_applies_every_section() {
        let toml_config: BootfolioToml = toml::from_str(
            r#"
[boot]
initial_delay_ms = 10
prompt_delay_ms = 20
confirm_delay_ms = 30
skip = true

[shell]
prompt = "guest@lab:~$"
grace_delay_ms = 40

[profile]
path = "/tmp/profile.toml"
"#,
        )
        .unwrap();

        let mut config = ConsoleConfig::default();
        apply_toml_config(&mut config, &toml_config);

        assert_eq!(config.boot.initial_delay, Duration::from_millis(10));
        assert_eq!(config.boot.prompt_delay, Duration::from_millis(20));
        assert_eq!(config.boot.confirm_delay, Duration::from_millis(30));
        assert!(config.skip_boot);
        assert_eq!(config.prompt, "guest@lab:~$");
        assert_eq!(config.grace_delay, Duration::from_millis(40));
        assert_eq!(config.profile_path, Some(PathBuf::from("/tmp/profile.toml")));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_config: BootfolioToml = toml::from_str("[shell]\ngrace_delay_ms = 0\n").unwrap();
        let mut config = ConsoleConfig::default();
        apply_toml_config(&mut config, &toml_config);

        assert_eq!(config.grace_delay, Duration::ZERO);
        assert_eq!(config.boot, BootTimings::default());
        assert_eq!(config.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn test_load_from_file_sets_source_and_path() {
        let file = write_toml("[boot]\nskip = true\n");
        let config = load_config_from_path(Some(file.path().to_path_buf())).unwrap();

        assert!(config.skip_boot || config.source() == ConfigSource::Env);
        assert_eq!(config.config_file_path, Some(file.path().to_path_buf()));
    }

    // =========================================================================
    // Missing / Malformed File Tests
    // =========================================================================

    #[test]
    fn test_missing_file_graceful() {
        let path = PathBuf::from("/nonexistent/path/bootfolio.toml");
        let config = load_config_from_path(Some(path)).unwrap();
        assert_eq!(config.config_file_path, None);
    }

    #[test]
    fn test_malformed_toml_error() {
        let file = write_toml("[boot\ninitial_delay_ms = \"soon\"\n");
        let result = load_config_from_path(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let file = write_toml("[boot]\ninitial_delay_ms = \"soon\"\n");
        let result = load_config_from_path(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn test_empty_prompt_rejected() {
        let config = ConsoleConfig {
            prompt: "   ".to_string(),
            ..ConsoleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_oversized_delay_rejected() {
        let mut config = ConsoleConfig::default();
        config.grace_delay = MAX_DELAY + Duration::from_millis(1);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("shell.grace_delay"));
    }

    // =========================================================================
    // Priority Ordering Tests
    // =========================================================================

    #[test]
    fn test_env_overrides_file() {
        let toml_config: BootfolioToml =
            toml::from_str("[shell]\nprompt = \"file$\"\ngrace_delay_ms = 100\n").unwrap();

        let mut config = ConsoleConfig::default();
        apply_toml_config(&mut config, &toml_config);
        config.set_source(ConfigSource::File);

        apply_env_from(
            &mut config,
            env_of(&[("BOOTFOLIO_PROMPT", "env$"), ("BOOTFOLIO_GRACE_MS", "250")]),
        );

        assert_eq!(config.prompt, "env$");
        assert_eq!(config.grace_delay, Duration::from_millis(250));
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_env_skip_boot_parsing() {
        for (value, expected) in [("1", true), ("true", true), ("0", false), ("FALSE", false)] {
            let mut config = ConsoleConfig::default();
            apply_env_from(&mut config, env_of(&[("BOOTFOLIO_SKIP_BOOT", value)]));
            assert_eq!(config.skip_boot, expected, "value {value:?}");
        }
    }

    #[test]
    fn test_env_empty_values_are_unset() {
        let mut config = ConsoleConfig::default();
        apply_env_from(
            &mut config,
            env_of(&[
                ("BOOTFOLIO_SKIP_BOOT", ""),
                ("BOOTFOLIO_PROMPT", "  "),
                ("BOOTFOLIO_PROFILE", ""),
            ]),
        );
        assert!(!config.skip_boot);
        assert_eq!(config.prompt, ConsoleConfig::default().prompt);
        assert_eq!(config.profile_path, None);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_env_unparseable_number_ignored() {
        let mut config = ConsoleConfig::default();
        apply_env_from(&mut config, env_of(&[("BOOTFOLIO_GRACE_MS", "soon")]));
        assert_eq!(config.grace_delay, Duration::from_millis(500));
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_env_profile_and_initial_delay() {
        let mut config = ConsoleConfig::default();
        apply_env_from(
            &mut config,
            env_of(&[
                ("BOOTFOLIO_PROFILE", "/srv/me.toml"),
                ("BOOTFOLIO_BOOT_INITIAL_MS", "0"),
            ]),
        );
        assert_eq!(config.profile_path, Some(PathBuf::from("/srv/me.toml")));
        assert_eq!(config.boot.initial_delay, Duration::ZERO);
    }

    #[test]
    fn test_cli_overrides_env() {
        let mut config = ConsoleConfig::default();
        apply_env_from(&mut config, env_of(&[("BOOTFOLIO_SKIP_BOOT", "0")]));

        ConfigOverrides::new()
            .with_skip_boot(true)
            .apply(&mut config);

        assert!(config.skip_boot);
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    // =========================================================================
    // ConfigOverrides Tests
    // =========================================================================

    #[test]
    fn test_config_overrides_builder() {
        let overrides = ConfigOverrides::new()
            .with_skip_boot(true)
            .with_profile_path(PathBuf::from("/p.toml"))
            .with_grace_delay_ms(5)
            .with_prompt("$".to_string());

        assert_eq!(overrides.skip_boot, Some(true));
        assert_eq!(overrides.profile_path, Some(PathBuf::from("/p.toml")));
        assert_eq!(overrides.grace_delay_ms, Some(5));
        assert_eq!(overrides.prompt, Some("$".to_string()));
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_config_overrides_empty_no_change() {
        let mut config = ConsoleConfig::default();
        ConfigOverrides::new().apply(&mut config);
        assert_eq!(config, ConsoleConfig::default());
    }

    // =========================================================================
    // ConfigSource / Error Display Tests
    // =========================================================================

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::Cli), "CLI");
        assert_eq!(format!("{}", ConfigSource::Env), "environment");
        assert_eq!(format!("{}", ConfigSource::File), "config file");
        assert_eq!(format!("{}", ConfigSource::Default), "default");
    }

    #[test]
    fn test_config_error_display() {
        let read_err = ConfigError::ReadError {
            path: PathBuf::from("/test/path"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = read_err.to_string();
        assert!(msg.contains("/test/path"));
        assert!(msg.contains("Failed to read"));
    }
}
