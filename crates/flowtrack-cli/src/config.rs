//! Layered settings: built-in defaults, then `config.toml`, then
//! environment and command-line flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use flowtrack_core::board::model::{DEFAULT_BOARD_COLOR, DEFAULT_SLOT};

const APP_DIR: &str = "flowtrack";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub db_path: Option<PathBuf>,
    pub slot: Option<String>,
    pub default_color: Option<String>,
}

impl FileConfig {
    /// Read the config file.
    ///
    /// An explicit path must exist. The default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub db_path: Option<PathBuf>,
    pub slot: Option<String>,
    pub ephemeral: bool,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub slot: String,
    pub default_color: String,
    pub ephemeral: bool,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let db_path = overrides
            .db_path
            .or(file.db_path)
            .unwrap_or_else(default_db_path);
        let slot = overrides
            .slot
            .or(file.slot)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SLOT.to_string());
        let default_color = file
            .default_color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BOARD_COLOR.to_string());

        Self {
            db_path,
            slot,
            default_color,
            ephemeral: overrides.ephemeral,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `<data dir>/flowtrack/flowtrack.db`, or the working directory when the
/// platform has no data dir.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flowtrack.db")
}
