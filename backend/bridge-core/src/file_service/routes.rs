use crate::error::download::DownloadError;
use crate::file_manager::{FileManagerOpener, opener_for_platform};
use crate::file_service::handlers::{download, file_manager, probe, save, static_files, transfer};
use crate::file_service::{REQUEST_TIMEOUT, guard};

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use reqwest::Client;
use tower_http::timeout::TimeoutLayer;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Collaborators shared by every route of one file service instance.
#[derive(Clone)]
pub struct RouteContext {
    pub opener: Arc<dyn FileManagerOpener>,
    pub http: Client,
}

impl RouteContext {
    pub fn new(opener: Arc<dyn FileManagerOpener>, http: Client) -> Self {
        Self { opener, http }
    }

    /// Context for the platform this process runs on.
    pub fn from_platform() -> Result<Self, DownloadError> {
        let http = Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
        Ok(Self::new(opener_for_platform(std::env::consts::OS), http))
    }
}

/// Build the file service router.
///
/// Layers run outermost first: loopback check, header size check, timeout.
pub fn build_router(context: RouteContext) -> Router {
    Router::new()
        .route("/file-service/{*path}", get(static_files::serve_file))
        .route("/isfile/", get(probe::is_file).post(probe::is_file))
        .route("/deletedir/", post(transfer::delete_dir))
        .route("/filemanager/", post(file_manager::open_in_file_manager))
        .route("/download", post(download::download))
        .route("/savefile", post(save::save_text_file))
        .route("/savebinfile", post(save::save_binary_file))
        .route("/fs/copy", post(transfer::copy))
        .route("/fs/move", post(transfer::move_node))
        .with_state(context)
        .layer(DefaultBodyLimit::disable())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(from_fn(guard::limit_header_size))
        .layer(from_fn(guard::reject_non_loopback))
}
