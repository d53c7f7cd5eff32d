//! Text and binary save routes.

use crate::file_service::handlers::FormFields;
use crate::file_service::response::{RouteError, text};
use crate::fs_ops;

use std::path::Path;

use axum::extract::Multipart;
use axum::response::Response;
use log::info;
use serde::Deserialize;

const FILE_PART: &str = "file";
const FILENAME_PART: &str = "filename";

#[derive(Debug, Deserialize)]
pub struct SaveTextParams {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content: String,
}

/// Write `content` to `filename`, creating parent directories first.
pub async fn save_text_file(
    FormFields(params): FormFields<SaveTextParams>,
) -> Result<Response, RouteError> {
    fs_ops::write_file(Path::new(&params.filename), params.content.as_bytes()).await?;
    info!("Saved {} bytes to {}", params.content.len(), params.filename);
    Ok(text(""))
}

/// Write the uploaded `file` part to the path in the `filename` part.
pub async fn save_binary_file(mut multipart: Multipart) -> Result<Response, RouteError> {
    let mut filename = None;
    let mut contents = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RouteError::bad_request(e.body_text()))?
    {
        match field.name() {
            Some(FILE_PART) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| RouteError::bad_request(e.body_text()))?;
                contents = Some(bytes);
            }
            Some(FILENAME_PART) => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| RouteError::bad_request(e.body_text()))?;
                filename = Some(value);
            }
            _ => {}
        }
    }

    let contents = contents.ok_or_else(|| RouteError::bad_request("missing 'file' part"))?;
    let filename = filename.unwrap_or_default();

    fs_ops::write_file(Path::new(&filename), &contents).await?;
    info!("Saved {} uploaded bytes to {filename}", contents.len());
    Ok(text(""))
}
