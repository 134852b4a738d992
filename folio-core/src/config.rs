//! Dashboard configuration: backend location, history window, logging.
//!
//! Stored as TOML. Every field has a default, so a partial file is fine and a
//! missing default file means "all defaults".

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::MAX_HISTORY_DAYS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("config {path}: history_days must be at most {max}, got {value}")]
    HistoryDays { path: PathBuf, value: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root URL of the dashboard server.
    pub base_url: String,
    /// Days of price history requested per ticker.
    pub history_days: u32,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    /// Log destination for the TUI; defaults under the local data directory.
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            history_days: 30,
            timeout_secs: 30,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl DashboardConfig {
    /// `<config_dir>/folio/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        if config.history_days > MAX_HISTORY_DAYS {
            return Err(ConfigError::HistoryDays {
                path: origin.to_path_buf(),
                value: config.history_days,
                max: MAX_HISTORY_DAYS,
            });
        }
        Ok(config)
    }

    /// Load a config file. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// An explicit path must load; otherwise try the default path and fall
    /// back to defaults when it does not exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Unknown names fall back to `info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("folio")
                .join("folio.log")
        })
    }
}
