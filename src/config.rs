//! Configuration file support for qrz-sync.
//!
//! Loads settings from `~/.config/qrz-sync/config.toml` on Linux
//! (or platform-appropriate location on other OSes). Every setting can be
//! overridden on the command line.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::fetch::{DEFAULT_TIMEOUT_SECS, QRZ_API_URL};

/// Application configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// QRZ Logbook API key (Settings > API Key on logbook.qrz.com).
    pub api_key: Option<String>,

    /// QRZ Logbook API endpoint.
    pub api_url: String,

    /// HTML page whose stat counters get rewritten.
    pub html_path: PathBuf,

    /// Output path for the searchable logbook CSV.
    pub csv_path: PathBuf,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: QRZ_API_URL.to_string(),
            html_path: PathBuf::from("index.html"),
            csv_path: PathBuf::from("data/logbook.csv"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Invalid TOML in config file: {}", path.display()))
            }
            _ => Ok(Config::default()),
        }
    }

    /// Returns the path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("qrz-sync/config.toml"))
    }
}
