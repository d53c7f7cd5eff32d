use common::ErrorLocation;

use std::io::Error as IoError;
use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ServerError {
    #[error("Bind Error: {addr}: {message} {location}")]
    Bind {
        addr: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Start Error: {addr}: {message} {location}")]
    Start {
        addr: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Start Timeout Error: {addr}: {message} {location}")]
    Timeout {
        addr: String,
        message: String,
        location: ErrorLocation,
    },
}

impl ServerError {
    /// Human-readable reason without the location suffix, suitable for the
    /// `Error` field of a status report.
    pub fn reason(&self) -> &str {
        match self {
            ServerError::Bind { message, .. }
            | ServerError::Start { message, .. }
            | ServerError::Timeout { message, .. } => message,
        }
    }

    #[track_caller]
    pub(crate) fn bind(addr: &str, error: &IoError) -> Self {
        ServerError::Bind {
            addr: addr.to_string(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
