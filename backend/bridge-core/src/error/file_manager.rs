use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum FileManagerError {
    #[error("Unsupported Platform Error: no file manager for '{platform}' {location}")]
    Unsupported {
        platform: String,
        location: ErrorLocation,
    },

    #[error("File Manager Launch Error: {program} {path}: {message} {location}")]
    Launch {
        program: &'static str,
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },
}
