use common::ErrorLocation;

use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;
use std::path::{Path, PathBuf};

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum FsOpError {
    #[error("Not Found Error: {path} {location}")]
    NotFound {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Invalid Path Error: {path}: {reason} {location}")]
    InvalidPath {
        path: PathBuf,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Filesystem Error: {operation} {path}: {source} {location}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: IoError,
        location: ErrorLocation,
    },

    #[error("Filesystem Task Error: {message} {location}")]
    Task {
        message: String,
        location: ErrorLocation,
    },
}

impl FsOpError {
    /// Wrap an I/O failure with the operation and path it concerned.
    #[track_caller]
    pub(crate) fn io(operation: &'static str, path: &Path, source: IoError) -> Self {
        if source.kind() == ErrorKind::NotFound {
            return FsOpError::NotFound {
                path: path.to_path_buf(),
                location: ErrorLocation::from(Location::caller()),
            };
        }
        FsOpError::Io {
            operation,
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn invalid(path: &Path, reason: impl Into<String>) -> Self {
        FsOpError::InvalidPath {
            path: path.to_path_buf(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tokio::task::JoinError> for FsOpError {
    #[track_caller]
    fn from(error: tokio::task::JoinError) -> Self {
        FsOpError::Task {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
