//! Optional TOML configuration for the `hill` command-line tool.
//!
//! ```toml
//! key = [[3, 3], [2, 5]]
//! format = "groups"
//! group_size = 5
//! odd_length = "reject"
//! ```
//!
//! Every field is optional; command-line flags take precedence.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::HillError;
use crate::hill2x2::OddLengthPolicy;
use crate::internal::Matrix2;
use crate::key::{Key, DEFAULT_KEY};
use crate::output_format::{FormatKind, OutputFormat, DEFAULT_GROUP_SIZE};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "HILL_CONFIG";

fn default_key() -> [[i64; 2]; 2] {
    DEFAULT_KEY
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE
}

/// Defaults for the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Key matrix, row-major
    #[serde(default = "default_key")]
    pub key: [[i64; 2]; 2],

    /// Output format for ciphertext and plaintext
    #[serde(default)]
    pub format: FormatKind,

    /// Group width for the `groups` format
    #[serde(default = "default_group_size")]
    pub group_size: usize,

    /// Handling of odd-length ciphertext
    #[serde(default)]
    pub odd_length: OddLengthPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key: default_key(),
            format: FormatKind::default(),
            group_size: default_group_size(),
            odd_length: OddLengthPolicy::default(),
        }
    }
}

impl Config {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse TOML text.
    ///
    /// Key entries must lie in 0..=25; invertibility is only checked when the
    /// key is actually used, so a command-line key can stand in for a bad one.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Cannot parse TOML")?;
        Matrix2::try_new(config.key).context("Config key is out of range")?;
        Ok(config)
    }

    /// Load from an explicit path, else from `$HILL_CONFIG`, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// The configured key, checked for range and invertibility
    pub fn validated_key(&self) -> Result<Key, HillError> {
        Key::from_entries(self.key)
    }

    /// `explicit` parsed as a key if given, else the configured key
    pub fn key_or(&self, explicit: Option<&str>) -> Result<Key, HillError> {
        match explicit {
            Some(text) => text.parse(),
            None => self.validated_key(),
        }
    }

    /// The configured output format
    pub fn output_format(&self) -> OutputFormat {
        self.format.with_group_size(self.group_size)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Cannot serialize config")
    }
}
