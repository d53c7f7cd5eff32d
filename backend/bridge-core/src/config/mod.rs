use crate::DEFAULT_SERVER_ADDR;
use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_DIR_NAME: &str = "scrapbee";
pub const CONFIG_FILE_NAME: &str = "backend.toml";

const MAX_SETTLE_INTERVAL_MS: u64 = 60_000;
const MAX_POLL_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Address used when the process is started with `web-server`.
    #[serde(default = "default_addr")]
    pub default_addr: String,

    /// Longest wait for a new listener's bind acknowledgment.
    #[serde(default = "default_settle_interval_ms")]
    pub settle_interval_ms: u64,

    /// Sleep between read loop iterations.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Directory for the log file. The working directory when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_addr: default_addr(),
            settle_interval_ms: default_settle_interval_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            log_dir: None,
        }
    }
}

fn default_addr() -> String {
    DEFAULT_SERVER_ADDR.to_string()
}
fn default_settle_interval_ms() -> u64 {
    2_000
}
fn default_poll_interval_ms() -> u64 {
    100
}

/// `<platform config dir>/scrapbee`, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

impl BridgeConfig {
    /// Read `<config_dir>/backend.toml`.
    ///
    /// A missing file is not an error: the defaults are returned.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ReadError`] if the file exists but cannot be read
    /// - [`ConfigError::ParseError`] if it is not valid TOML for this struct
    /// - [`ConfigError::ValidationError`] if a value is out of range
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                warn!("Cannot read {}: {e}", path.display());
                return Err(ConfigError::ReadError {
                    path,
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let config = Self::parse_at(&contents, &path)?;
        info!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML config text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Self::parse_at(contents, Path::new(CONFIG_FILE_NAME))
    }

    fn parse_at(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: BridgeConfig = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_addr.trim().is_empty() || !self.default_addr.contains(':') {
            return Err(ConfigError::invalid(format!(
                "default_addr '{}' is not host:port",
                self.default_addr
            )));
        }

        if !(1..=MAX_SETTLE_INTERVAL_MS).contains(&self.settle_interval_ms) {
            return Err(ConfigError::invalid(format!(
                "settle_interval_ms {} outside 1-{MAX_SETTLE_INTERVAL_MS}",
                self.settle_interval_ms
            )));
        }

        if self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ConfigError::invalid(format!(
                "poll_interval_ms {} above {MAX_POLL_INTERVAL_MS}",
                self.poll_interval_ms
            )));
        }

        Ok(())
    }

    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_interval_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Directory the log file goes into.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
