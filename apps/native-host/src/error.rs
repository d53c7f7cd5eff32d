use bridge_core::error::CoreError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Failures that end the process.
#[derive(Debug, Error)]
pub enum HostError {
    /// The log file or the global logger could not be set up
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    /// The host loop could not be started
    #[error("Runtime Error: {message} {location}")]
    Runtime {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CoreError> for HostError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        HostError::Runtime {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
