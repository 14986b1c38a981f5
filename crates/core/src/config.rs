use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;

/// Root configuration structure for parley.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Contact export to open when no --fixture flag is given
    #[serde(default = "default_fixture")]
    pub fixture: PathBuf,

    /// Participant id used for locally drafted messages
    #[serde(default = "default_local_participant")]
    pub local_participant: String,

    /// strftime pattern for bubble timestamps
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Per-participant profile entries keyed by participant id
    #[serde(default)]
    pub contacts: HashMap<String, ContactEntry>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Configured profile details for one participant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactEntry {
    /// Display name for panels and bubble headers
    pub display_name: String,

    /// Free-form note shown in the profile panel
    #[serde(default)]
    pub about: String,
}

/// The `[logging]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    /// Default filter level for stderr output
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for stderr: "pretty", "json", "compact"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// File logging
    #[serde(default)]
    pub file: FileLoggingSettings,
}

/// The `[logging.file]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingSettings {
    /// Write JSON log lines under the log directory
    #[serde(default)]
    pub enabled: bool,
}

fn default_fixture() -> PathBuf {
    PathBuf::from("fixtures/contact_sample.json")
}

fn default_local_participant() -> String {
    "CUSTOMER".to_string()
}

fn default_time_format() -> String {
    "%b %d, %Y %H:%M:%S".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format(), file: FileLoggingSettings::default() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixture: default_fixture(),
            local_participant: default_local_participant(),
            time_format: default_time_format(),
            contacts: HashMap::new(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(toml_str).map_err(|e| crate::Error::Config(format!("TOML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Configured display names keyed by participant id
    pub fn contact_names(&self) -> HashMap<String, String> {
        self.contacts
            .iter()
            .map(|(id, entry)| (id.clone(), entry.display_name.clone()))
            .collect()
    }

    /// Configured about-notes keyed by participant id
    pub fn contact_abouts(&self) -> HashMap<String, String> {
        self.contacts
            .iter()
            .filter(|(_, entry)| !entry.about.is_empty())
            .map(|(id, entry)| (id.clone(), entry.about.clone()))
            .collect()
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        use crate::Error;

        if self.local_participant.trim().is_empty() {
            return Err(Error::Config(ConfigError::EmptyLocalParticipant.to_string()));
        }

        if self.time_format.trim().is_empty() {
            return Err(Error::Config(ConfigError::EmptyTimeFormat.to_string()));
        }

        // chrono reports a bad pattern when formatting, not when parsing,
        // so probe with a fixed timestamp to fail at load time instead of
        // mid-render.
        use std::fmt::Write;
        let probe = chrono::DateTime::UNIX_EPOCH.format(&self.time_format);
        if write!(&mut String::new(), "{}", probe).is_err() {
            return Err(Error::Config(
                ConfigError::InvalidTimeFormat(self.time_format.clone()).to_string(),
            ));
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# Parley Configuration Example
# Copy this file to parley.toml and customize as needed

# Contact export to open when no --fixture flag is given
fixture = "fixtures/contact_sample.json"

# Participant id attributed to locally drafted messages
local_participant = "CUSTOMER"

# strftime pattern for bubble timestamps
time_format = "%b %d, %Y %H:%M:%S"

# Per-participant profile entries (optional)
[contacts.AGENT]
display_name = "Support Agent"
about = "Tier 1 support, order issues"

[contacts.CUSTOMER]
display_name = "Customer"

# Logging
[logging]
level = "warn"
format = "pretty"

[logging.file]
enabled = false
"#
    }
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// local_participant must name a participant
    #[error("local_participant must not be empty")]
    EmptyLocalParticipant,

    /// time_format must be a strftime pattern
    #[error("time_format must not be empty")]
    EmptyTimeFormat,

    /// time_format failed the formatting probe
    #[error("time_format is not a valid strftime pattern: {0}")]
    InvalidTimeFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fixture, PathBuf::from("fixtures/contact_sample.json"));
        assert_eq!(config.local_participant, "CUSTOMER");
        assert_eq!(config.time_format, "%b %d, %Y %H:%M:%S");
        assert!(config.contacts.is_empty());
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.file.enabled);
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_toml_str(Config::example()).unwrap();
        assert_eq!(config.local_participant, "CUSTOMER");
        assert_eq!(config.contacts["AGENT"].display_name, "Support Agent");
        assert_eq!(config.contacts["AGENT"].about, "Tier 1 support, order issues");
        assert_eq!(config.contacts["CUSTOMER"].about, "");
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.local_participant, "CUSTOMER");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = Config::from_toml_str("unknown_key = true").unwrap_err();
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_empty_local_participant_rejected() {
        let err = Config::from_toml_str(r#"local_participant = "  ""#).unwrap_err();
        assert!(err.to_string().contains("local_participant"));
    }

    #[test]
    fn test_empty_time_format_rejected() {
        let err = Config::from_toml_str(r#"time_format = """#).unwrap_err();
        assert!(err.to_string().contains("time_format"));
    }

    #[test]
    fn test_invalid_time_format_rejected() {
        let err = Config::from_toml_str(r#"time_format = "%Q%Q%Q""#).unwrap_err();
        assert!(err.to_string().contains("strftime"));
    }

    #[test]
    fn test_contact_maps() {
        let config = Config::from_toml_str(Config::example()).unwrap();

        let names = config.contact_names();
        assert_eq!(names["AGENT"], "Support Agent");

        let abouts = config.contact_abouts();
        assert!(abouts.contains_key("AGENT"));
        assert!(!abouts.contains_key("CUSTOMER"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", Config::example()).unwrap();

        let config = Config::from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.contacts.len(), 2);
    }
}
