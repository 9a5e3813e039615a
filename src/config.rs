//! Configuration for eagle

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the task storage file
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Sort every listing by group
    #[serde(default)]
    pub sort_by_group: bool,
}

/// Directory holding eagle's files: `~/.config/eagle`
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("eagle")
}

fn default_storage_path() -> PathBuf {
    config_dir().join("storage.toml")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            sort_by_group: false,
        }
    }
}

impl Config {
    /// Load config from `path`, or from `~/.config/eagle/config.toml`, or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::read(config_path);
        }

        let default_path = config_dir().join("config.toml");
        if default_path.exists() {
            return Self::read(&default_path);
        }

        Ok(Config::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}
