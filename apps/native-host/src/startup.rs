//! Process startup: config discovery and log directory preparation.

use crate::error::HostError;

use bridge_core::BridgeConfig;
use bridge_core::config::default_config_dir;
use bridge_core::error::config::ConfigError;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::path::{Path, PathBuf};

/// Load the config from `config_dir`, or the platform default directory.
///
/// The logger is not up yet, so a broken config file is handed back next to
/// the defaults for the caller to log once it is.
pub fn load_config(config_dir: Option<&Path>) -> (BridgeConfig, Option<ConfigError>) {
    let dir = match config_dir.map(Path::to_path_buf).or_else(default_config_dir) {
        Some(dir) => dir,
        None => return (BridgeConfig::default(), None),
    };

    match BridgeConfig::load(&dir) {
        Ok(config) => (config, None),
        Err(e) => (BridgeConfig::default(), Some(e)),
    }
}

/// Create the configured log directory if needed and return it.
#[track_caller]
pub fn prepare_log_dir(config: &BridgeConfig) -> Result<PathBuf, HostError> {
    let log_dir = config.log_dir();
    create_dir_all(&log_dir).map_err(|e| HostError::Logger {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;
    Ok(log_dir)
}
