//! # Configuration
//!
//! Reads the JSON configuration stored in `~/.config/nft-tui/config.json`
//! (or the file given with `--config`).
//!
//! ## Overview
//!
//! Every field is optional; anything missing falls back to the defaults
//! below, and unknown fields are rejected so typos do not go unnoticed.
//!
//! ```json
//! {
//!   "theme": "Terminal",
//!   "nft_binary": "nft",
//!   "config_file": "/etc/nftables.conf",
//!   "family": "inet",
//!   "table": "filter",
//!   "sets": ["blacklist4", "whitelist4"],
//!   "kernel_log_lines": 300,
//!   "max_capture_bytes": null,
//!   "confirm_destructive": true
//! }
//! ```
//!
//! Nothing is ever written back: the file is edited by hand.
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::command::is_valid_set_name;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name of the color theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Rule-management tool, looked up on `PATH` unless absolute.
    #[serde(default = "default_nft_binary")]
    pub nft_binary: String,

    /// Ruleset file checked and applied from the main menu.
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,

    /// Address family of the table holding the managed sets.
    #[serde(default = "default_family")]
    pub family: String,

    /// Table holding the managed sets.
    #[serde(default = "default_table")]
    pub table: String,

    /// Named sets offered in the main menu, in display order.
    #[serde(default = "default_sets")]
    pub sets: Vec<String>,

    /// How many kernel log lines to fetch.
    #[serde(default = "default_kernel_log_lines")]
    pub kernel_log_lines: u32,

    /// Upper bound on captured output per command; `null` keeps everything.
    #[serde(default)]
    pub max_capture_bytes: Option<usize>,

    /// Ask before applying the ruleset file or flushing a set.
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

fn default_theme_name() -> String {
    "Terminal".to_string()
}

fn default_nft_binary() -> String {
    "nft".to_string()
}

fn default_config_file() -> PathBuf {
    PathBuf::from("/etc/nftables.conf")
}

fn default_family() -> String {
    "inet".to_string()
}

fn default_table() -> String {
    "filter".to_string()
}

fn default_sets() -> Vec<String> {
    vec!["blacklist4".to_string(), "whitelist4".to_string()]
}

fn default_kernel_log_lines() -> u32 {
    300
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            nft_binary: default_nft_binary(),
            config_file: default_config_file(),
            family: default_family(),
            table: default_table(),
            sets: default_sets(),
            kernel_log_lines: default_kernel_log_lines(),
            max_capture_bytes: None,
            confirm_destructive: true,
        }
    }
}

impl Config {
    /// Load from `path` if given, otherwise from the default location.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific path. Returns `Config::default()`
    /// if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would end up as malformed tool arguments.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nft_binary.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "nft_binary",
            });
        }
        if self.config_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "config_file",
            });
        }
        for name in std::iter::once(&self.family)
            .chain(std::iter::once(&self.table))
            .chain(&self.sets)
        {
            if !is_valid_set_name(name) {
                return Err(ConfigError::InvalidSetName(name.clone()));
            }
        }
        Ok(())
    }

    /// Return the path to the default config file.
    pub fn config_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "nft-tui")?;
        Some(dirs.config_dir().join("config.json"))
    }
}
