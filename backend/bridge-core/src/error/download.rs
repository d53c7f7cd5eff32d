use crate::error::fs_ops::FsOpError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DownloadError {
    #[error("Download HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("Download URL Error: {message} {location}")]
    InvalidUrl {
        message: String,
        location: ErrorLocation,
    },

    #[error("Base64 Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Fs(#[from] FsOpError),
}

impl From<reqwest::Error> for DownloadError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        DownloadError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for DownloadError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        DownloadError::InvalidUrl {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<base64::DecodeError> for DownloadError {
    #[track_caller]
    fn from(error: base64::DecodeError) -> Self {
        DownloadError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
