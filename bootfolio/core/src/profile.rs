//! Portfolio Profile
//!
//! All static text the console displays: boot script, shell payloads, résumé
//! sections and the LCD messages. A built-in profile ships inside the crate;
//! a TOML file with the same shape can replace it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boot::BootLine;

const BUILTIN_PROFILE: &str = include_str!("../assets/profile.toml");

/// Errors that can occur when loading a profile
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Failed to read profile file
    #[error("Failed to read profile at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse profile: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Structurally valid but unusable content
    #[error("Invalid profile: {0}")]
    ValidationError(String),
}

/// Who the portfolio is about, plus shell chrome text
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Full name
    pub name: String,
    /// Name as shown under the boot banner
    pub banner_name: String,
    /// One-line tagline under the banner
    pub tagline: String,
    /// Headline for `whoami`
    pub headline: String,
    /// Shell header title
    pub shell_title: String,
    /// Shell header hint line
    pub shell_hint: String,
    /// Lines printed above the scroll-back
    #[serde(default)]
    pub welcome: Vec<String>,
}

/// A project listed by `run projects`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Short id, also the `cat projects/<id>` key
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Technology summary
    pub tech: String,
}

/// An entry for `cat experience`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    /// Period label, e.g. `2022–24`
    pub period: String,
    /// Role and place
    pub title: String,
    /// Bullet lines
    #[serde(default)]
    pub details: Vec<String>,
}

/// A skill bar for `cat skills`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill name
    pub name: String,
    /// Level in percent (0-100)
    pub level: u8,
}

/// A block of preformatted lines
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The lines
    #[serde(default)]
    pub lines: Vec<String>,
}

/// One section of the résumé view
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Stable id (`home`, `about`, ...)
    pub id: String,
    /// Navigation label
    pub title: String,
    /// Body lines, may carry markup
    #[serde(default)]
    pub lines: Vec<String>,
}

/// Two-line message for the 16x2 LCD
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcdMessage {
    /// First row
    pub top: String,
    /// Second row
    pub bottom: String,
}

/// A memory-mapped register shown by the register dump
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    /// Bus address, e.g. `0x20001000`
    pub address: u32,
    /// Register mnemonic (`SKILL_C`, `AWS_CERT`, ...)
    pub name: String,
    /// What the register measures
    pub description: String,
    /// Value in percent (0-100), also the register contents
    pub percentage: u8,
}

impl Register {
    /// Whether the value drifts while the dump is live
    #[must_use]
    pub fn is_skill(&self) -> bool {
        self.name.starts_with("SKILL")
    }
}

/// A device answering on the simulated I2C bus
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct I2cDevice {
    /// 7-bit bus address
    pub address: u8,
    /// Device name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Project the device stands for
    pub project: String,
    /// Status badge (`Active`, `Optimized`, ...)
    pub status: String,
    /// Longer description for the details view
    pub details: String,
}

/// Complete portfolio content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identity and chrome text
    pub identity: Identity,
    /// Boot script
    #[serde(default)]
    pub boot: Vec<BootLine>,
    /// Projects
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Experience entries
    #[serde(default)]
    pub experience: Vec<Experience>,
    /// Skill bars
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Thesis summary
    #[serde(default)]
    pub thesis: TextBlock,
    /// Contact block
    #[serde(default)]
    pub contact: TextBlock,
    /// LCD messages
    #[serde(default)]
    pub lcd: Vec<LcdMessage>,
    /// Register dump contents
    #[serde(default)]
    pub registers: Vec<Register>,
    /// Devices on the I2C bus
    #[serde(default)]
    pub i2c: Vec<I2cDevice>,
    /// Résumé sections
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Profile {
    /// The profile compiled into the crate
    ///
    /// # Errors
    ///
    /// Only fails if the embedded asset is malformed.
    pub fn builtin() -> Result<Self, ProfileError> {
        Self::from_toml(BUILTIN_PROFILE)
    }

    /// Parse and validate a profile from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML of the right shape or
    /// fails validation.
    pub fn from_toml(text: &str) -> Result<Self, ProfileError> {
        let profile: Self = toml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let text = std::fs::read_to_string(path).map_err(|e| ProfileError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let profile = Self::from_toml(&text)?;
        tracing::info!(path = %path.display(), "Loaded profile from file");
        Ok(profile)
    }

    /// Load `path` if given, the built-in profile otherwise
    ///
    /// # Errors
    ///
    /// See [`Profile::load`] and [`Profile::builtin`].
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ProfileError> {
        match path {
            Some(p) => Self::load(p),
            None => Self::builtin(),
        }
    }

    /// Look up a résumé section by id
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn validate(&self) -> Result<(), ProfileError> {
        if self.sections.is_empty() {
            return Err(ProfileError::ValidationError(
                "at least one [[sections]] entry is required".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for project in &self.projects {
            if project.id.trim().is_empty() {
                return Err(ProfileError::ValidationError(format!(
                    "project '{}' has an empty id",
                    project.name
                )));
            }
            if !ids.insert(project.id.to_lowercase()) {
                return Err(ProfileError::ValidationError(format!(
                    "duplicate project id '{}'",
                    project.id
                )));
            }
        }

        if let Some(skill) = self.skills.iter().find(|s| s.level > 100) {
            return Err(ProfileError::ValidationError(format!(
                "skill '{}' has level {} (max 100)",
                skill.name, skill.level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[identity]
name = "Test Person"
banner_name = "TEST PERSON"
tagline = "tag"
headline = "head"
shell_title = "title"
shell_hint = "hint"

[[sections]]
id = "home"
title = "Home"
lines = ["hello"]
"#;

    #[test]
    fn test_builtin_profile_parses() {
        let profile = Profile::builtin().unwrap();
        assert_eq!(profile.boot.len(), 5);
        assert_eq!(profile.projects.len(), 4);
        assert_eq!(profile.experience.len(), 4);
        assert_eq!(profile.skills.len(), 9);
        assert_eq!(profile.lcd.len(), 5);
        assert_eq!(profile.registers.len(), 10);
        assert_eq!(profile.i2c.len(), 4);

        let ids: Vec<&str> = profile.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["home", "about", "education", "experience", "research", "projects", "skills", "contact"]
        );
    }

    #[test]
    fn test_builtin_boot_delays() {
        let profile = Profile::builtin().unwrap();
        let delays: Vec<u64> = profile.boot.iter().map(|l| l.delay_ms).collect();
        assert_eq!(delays, vec![800, 600, 700, 900, 650]);
    }

    #[test]
    fn test_builtin_hardware_payload() {
        let profile = Profile::builtin().unwrap();

        let first = &profile.registers[0];
        assert_eq!(first.address, 0x2000_1000);
        assert_eq!(first.name, "SKILL_C");
        assert_eq!(first.percentage, 100);
        assert!(first.is_skill());
        assert!(!profile.registers[8].is_skill());

        let addresses: Vec<u8> = profile.i2c.iter().map(|d| d.address).collect();
        assert_eq!(addresses, vec![0x10, 0x20, 0x30, 0x40]);
        assert_eq!(profile.i2c[1].status, "Optimized");
    }

    #[test]
    fn test_minimal_profile_defaults() {
        let profile = Profile::from_toml(MINIMAL).unwrap();
        assert!(profile.boot.is_empty());
        assert!(profile.projects.is_empty());
        assert!(profile.thesis.lines.is_empty());
        assert!(profile.registers.is_empty());
        assert!(profile.i2c.is_empty());
        assert_eq!(profile.section("home").map(|s| s.lines.len()), Some(1));
        assert!(profile.section("nope").is_none());
    }

    #[test]
    fn test_no_sections_rejected() {
        let text = MINIMAL.split("[[sections]]").next().unwrap_or_default();
        let err = Profile::from_toml(text).unwrap_err();
        assert!(matches!(err, ProfileError::ValidationError(_)));
    }

    #[test]
    fn test_duplicate_project_ids_rejected() {
        let text = format!(
            "{MINIMAL}\n[[projects]]\nid = \"01\"\nname = \"a\"\ndescription = \"\"\ntech = \"\"\n\
             [[projects]]\nid = \"01\"\nname = \"b\"\ndescription = \"\"\ntech = \"\"\n"
        );
        let err = Profile::from_toml(&text).unwrap_err();
        assert!(err.to_string().contains("duplicate project id"));
    }

    #[test]
    fn test_skill_level_bounded() {
        let text = format!("{MINIMAL}\n[[skills]]\nname = \"x\"\nlevel = 150\n");
        assert!(matches!(
            Profile::from_toml(&text),
            Err(ProfileError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let profile = Profile::load(file.path()).unwrap();
        assert_eq!(profile.identity.name, "Test Person");
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = Profile::load(Path::new("/nonexistent/profile.toml")).unwrap_err();
        assert!(matches!(err, ProfileError::ReadError { .. }));
        assert!(err.to_string().contains("/nonexistent/profile.toml"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Profile::from_toml("[identity\nname = 1").unwrap_err();
        assert!(matches!(err, ProfileError::ParseError(_)));
    }
}
