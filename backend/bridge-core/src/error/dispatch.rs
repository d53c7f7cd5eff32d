use crate::error::frame::FrameError;

use common::ErrorLocation;
use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DispatchError {
    #[error("Unescape Error: {message} {location}")]
    Unescape {
        message: String,
        location: ErrorLocation,
    },

    #[error("Command Parse Error: {message} {location}")]
    Parse {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Report(#[from] ModelError),
}

impl DispatchError {
    #[track_caller]
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        DispatchError::Parse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
