//! Configuration management for the logging subsystem

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory holding the per-day log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Filename prefix for per-day log files (e.g. "logbook" -> logbook-2026-03-14.log)
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Days of log files to keep when purging expired files (default: 7)
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,
}

fn default_log_dir() -> PathBuf {
    config_dir().join("logs")
}

fn default_file_prefix() -> String {
    "logbook".to_string()
}

fn default_retention_days() -> u64 {
    7
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            file_prefix: default_file_prefix(),
            retention_days: default_retention_days(),
        }
    }
}

impl LogConfig {
    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = config_file_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Ensure the log directory exists
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.log_dir).context("Failed to create log directory")?;
        Ok(())
    }
}

/// Get the base configuration directory (~/.logbook)
/// Falls back to ./.logbook if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".logbook")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".logbook"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
