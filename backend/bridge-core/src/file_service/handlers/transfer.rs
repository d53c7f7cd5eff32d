//! Copy, move and delete routes.

use crate::file_service::handlers::{FormFields, PathParams, TransferParams};
use crate::file_service::response::{RouteError, text};
use crate::fs_ops;

use std::path::Path;

use axum::response::Response;
use log::info;

/// Recursively delete a directory. Non-directories and empty paths are left
/// alone.
pub async fn delete_dir(
    FormFields(params): FormFields<PathParams>,
) -> Result<Response, RouteError> {
    if params.path.is_empty() {
        return Ok(text(""));
    }

    if fs_ops::remove_dir(Path::new(&params.path)).await? {
        info!("Deleted directory {}", params.path);
    }
    Ok(text(""))
}

/// Copy `src` to `dest`, replacing whatever `dest` held.
pub async fn copy(
    FormFields(params): FormFields<TransferParams>,
) -> Result<Response, RouteError> {
    fs_ops::copy_node(Path::new(&params.src), Path::new(&params.dest)).await?;
    info!("Copied {} to {}", params.src, params.dest);
    Ok(text("ok"))
}

/// Copy `src` to `dest`, then delete `src`.
pub async fn move_node(
    FormFields(params): FormFields<TransferParams>,
) -> Result<Response, RouteError> {
    fs_ops::move_node(Path::new(&params.src), Path::new(&params.dest)).await?;
    info!("Moved {} to {}", params.src, params.dest);
    Ok(text("ok"))
}
