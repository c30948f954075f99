//! Application configuration: an optional RON file overridden by command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use summary_engine::ClientSettings;
use thiserror::Error;

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "bili_summary.ron";
pub const LOG_FILE: &str = "bili_summary.log";

#[derive(Debug, Parser)]
#[command(
    name = "bili-summary",
    version,
    about = "Summarize Bilibili videos through a summary server, from the terminal"
)]
pub struct Cli {
    /// Configuration file (RON). Defaults to ./bili_summary.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Base URL of the summary server, e.g. http://localhost:5000
    #[arg(long)]
    pub server: Option<String>,
    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum LogTarget {
    /// ./bili_summary.log; keeps the terminal UI clean.
    #[default]
    File,
    Terminal,
    Both,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub debounce_ms: u64,
    pub connect_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log: LogTarget,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            server_url: client.base_url,
            debounce_ms: summary_core::DEFAULT_DEBOUNCE.as_millis() as u64,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            max_response_bytes: client.max_bytes,
            log: LogTarget::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

impl AppConfig {
    /// Loads `explicit` (which must exist), else the default file if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(server) = &cli.server {
            self.server_url = server.clone();
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.server_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..ClientSettings::default()
        }
    }
}
