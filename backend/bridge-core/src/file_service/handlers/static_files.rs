use axum::extract::{Path, Request};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Serve any local file by absolute path.
///
/// The route captures the path without its leading slash; it is put back on
/// unix-like systems and left off on Windows (`C:/...`).
pub async fn serve_file(Path(path): Path<String>, request: Request) -> Response {
    let local = local_path(&path);

    match ServeFile::new(local).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

pub(crate) fn local_path(captured: &str) -> String {
    if cfg!(windows) {
        captured.to_string()
    } else {
        format!("/{}", captured.trim_start_matches('/'))
    }
}
