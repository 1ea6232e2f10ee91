//! Console configuration, read from a RON file.
//!
//! Every field is optional in the file; missing ones take their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use fetch_engine::{TransportSettings, DEFAULT_ENDPOINT};
use fetch_logging::{fetch_info, LogDestination};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Looked up in the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "fetch_console.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub(crate) enum LogSetting {
    Off,
    Terminal,
    #[default]
    File,
    Both,
}

impl From<LogSetting> for LogDestination {
    fn from(setting: LogSetting) -> Self {
        match setting {
            LogSetting::Off => LogDestination::Off,
            LogSetting::Terminal => LogDestination::Terminal,
            LogSetting::File => LogDestination::File,
            LogSetting::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) endpoint: String,
    pub(crate) connect_timeout_secs: u64,
    pub(crate) request_timeout_secs: Option<u64>,
    pub(crate) poll_interval_ms: u64,
    pub(crate) log: LogSetting,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            poll_interval_ms: 75,
            log: LogSetting::default(),
        }
    }
}

impl AppConfig {
    pub(crate) fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Loads `explicit` (which must exist) or, failing that, the default file
    /// if present.
    pub(crate) fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.is_file() {
                    return Ok(Self::default());
                }
                path
            }
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_ron(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        fetch_info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Command-line flags win over the file.
    pub(crate) fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
        self
    }

    pub(crate) fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
