use crate::download::download_to_path;
use crate::file_service::RouteContext;
use crate::file_service::handlers::FormFields;
use crate::file_service::response::{RouteError, text};
use crate::fs_ops;

use std::path::Path;

use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub filename: String,
}

/// Save `url` (remote or `data:image/...;base64,` URI) to `filename`.
///
/// Responds with the saved path. An empty `url` only prepares the parent
/// directory. Every response, rejections included, allows any origin.
pub async fn download(
    State(context): State<RouteContext>,
    fields: Result<FormFields<DownloadParams>, RouteError>,
) -> Response {
    let outcome = match fields {
        Ok(FormFields(params)) => run(&context, &params).await,
        Err(e) => Err(e),
    };

    let mut response = match outcome {
        Ok(saved) => text(saved),
        Err(e) => e.into_response(),
    };

    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

async fn run(context: &RouteContext, params: &DownloadParams) -> Result<String, RouteError> {
    let destination = Path::new(&params.filename);
    fs_ops::ensure_parent_dir(destination).await?;

    if params.url.is_empty() {
        return Ok(String::new());
    }

    let saved = download_to_path(&context.http, &params.url, destination).await?;
    Ok(saved.display().to_string())
}
