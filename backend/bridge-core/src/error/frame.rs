use common::ErrorLocation;

use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum FrameError {
    /// The stream ended cleanly at a frame boundary. Nothing was lost; the
    /// caller decides whether to wait and retry.
    #[error("Frame Stream Not Ready: {message} {location}")]
    NotReady {
        message: String,
        location: ErrorLocation,
    },

    #[error("Frame IO Error: {message} {location}")]
    Io {
        message: String,
        location: ErrorLocation,
    },

    #[error("Frame Too Large Error: {len} bytes exceeds limit of {max} bytes {location}")]
    TooLarge {
        len: u64,
        max: u64,
        location: ErrorLocation,
    },

    #[error("Malformed Frame Error: {message} {location}")]
    Malformed {
        message: String,
        location: ErrorLocation,
    },
}

impl FrameError {
    pub fn is_not_ready(&self) -> bool {
        matches!(self, FrameError::NotReady { .. })
    }
}

impl From<IoError> for FrameError {
    #[track_caller]
    fn from(error: IoError) -> Self {
        match error.kind() {
            ErrorKind::WouldBlock | ErrorKind::Interrupted => FrameError::NotReady {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => FrameError::Io {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}
