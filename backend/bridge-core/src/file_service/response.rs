use crate::error::download::DownloadError;
use crate::error::file_manager::FileManagerError;
use crate::error::fs_ops::FsOpError;

use std::fmt::Display;

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use log::error;

pub(crate) const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Failure of a single route, sent to the caller as a plain-text body.
#[derive(Debug)]
pub struct RouteError {
    status: StatusCode,
    message: String,
}

impl RouteError {
    pub fn internal(error: impl Display) -> Self {
        let message = error.to_string();
        error!("{message}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        (self.status, [(CONTENT_TYPE, TEXT_PLAIN)], self.message).into_response()
    }
}

impl From<FsOpError> for RouteError {
    fn from(error: FsOpError) -> Self {
        RouteError::internal(error)
    }
}

impl From<DownloadError> for RouteError {
    fn from(error: DownloadError) -> Self {
        RouteError::internal(error)
    }
}

impl From<FileManagerError> for RouteError {
    fn from(error: FileManagerError) -> Self {
        RouteError::internal(error)
    }
}

/// A `200 OK` plain-text body.
pub(crate) fn text(body: impl Into<String>) -> Response {
    ([(CONTENT_TYPE, TEXT_PLAIN)], body.into()).into_response()
}
