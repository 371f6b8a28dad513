//! Run configuration from environment variables.
//!
//! - `INTAKE_FILE`: match history to read (default `match_history.txt`)
//! - `INTAKE_ORGANIZATIONS`: optional JSON file of seed organizations
//! - `INTAKE_DELIMITER`: single-byte field delimiter (default `|`)
//! - `INTAKE_PRETTY`: pretty-print the JSON report (default true)

use crate::logic::DEFAULT_DELIMITER;
use crate::models::Organization;
use std::path::{Path, PathBuf};

/// Errors raised before a run starts: bad settings or unreadable files.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// A setting has an unusable value.
    Invalid(String),
    /// A configured file could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(msg) => write!(f, "Configuration error: {}", msg),
            ConfigError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntakeConfig {
    pub input: PathBuf,
    pub organizations: Option<PathBuf>,
    pub delimiter: u8,
    pub pretty: bool,
}

fn default_input() -> PathBuf {
    PathBuf::from("match_history.txt")
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            organizations: None,
            delimiter: DEFAULT_DELIMITER,
            pretty: true,
        }
    }
}

impl IntakeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = lookup("INTAKE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_input);
        let organizations = lookup("INTAKE_ORGANIZATIONS")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let delimiter = match lookup("INTAKE_DELIMITER") {
            Some(d) => parse_delimiter(&d)?,
            None => DEFAULT_DELIMITER,
        };
        let pretty = match lookup("INTAKE_PRETTY") {
            Some(v) => parse_flag(&v)?,
            None => true,
        };
        Ok(Self {
            input,
            organizations,
            delimiter,
            pretty,
        })
    }

    /// Seed organizations, or none when no file is configured.
    pub fn load_organizations(&self) -> Result<Vec<Organization>, ConfigError> {
        match &self.organizations {
            Some(path) => read_organizations(path),
            None => Ok(Vec::new()),
        }
    }
}

fn parse_delimiter(raw: &str) -> Result<u8, ConfigError> {
    match raw.as_bytes() {
        [b] => Ok(*b),
        _ => Err(ConfigError::Invalid(format!(
            "INTAKE_DELIMITER must be a single byte, got {:?}",
            raw
        ))),
    }
}

fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(format!("INTAKE_PRETTY: not a flag: {:?}", raw))),
    }
}

/// Parse a JSON array of organizations, e.g. `[{"id": "ctm", "name": "CTM", "keywords": ["CTM", "!Masters"]}]`.
pub fn parse_organizations(json: &str) -> Result<Vec<Organization>, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Invalid(format!("organizations: {}", e)))
}

fn read_organizations(path: &Path) -> Result<Vec<Organization>, ConfigError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
    parse_organizations(&json)
}
