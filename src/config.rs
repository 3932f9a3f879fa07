//! User configuration, read from `~/.tasklist/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::controller::Timing;
use crate::fields::Filter;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory holding `todos.json` and the log file.
    pub data_dir: Option<PathBuf>,
    /// Filter selected when the UI opens.
    pub default_filter: Filter,
    /// Fade-out time before a deleted row is removed.
    pub delete_delay_ms: u64,
    /// How long an invalid input stays highlighted.
    pub cue_ms: u64,
    /// Fallback log filter when `TASKLIST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: None,
            default_filter: Filter::All,
            delete_delay_ms: 300,
            cue_ms: 400,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or return defaults if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Resolved data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => base_dir(),
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            delete_delay: Duration::from_millis(self.delete_delay_ms),
            cue: Duration::from_millis(self.cue_ms),
        }
    }
}

/// Returns the base tasklist directory: ~/.tasklist/
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".tasklist"))
}

/// Returns the default config file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("config.toml"))
}
