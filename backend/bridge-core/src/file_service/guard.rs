//! Request guards applied to every route.

use crate::file_service::MAX_HEADER_BYTES;

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::warn;

pub(crate) async fn reject_non_loopback(
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !peer.ip().is_loopback() {
        warn!("Rejected non-loopback request from {peer}");
        return StatusCode::FORBIDDEN.into_response();
    }

    next.run(request).await
}

pub(crate) async fn limit_header_size(request: Request, next: Next) -> Response {
    let header_bytes: usize = request
        .headers()
        .iter()
        .map(|(name, value)| name.as_str().len() + value.len())
        .sum();

    if header_bytes > MAX_HEADER_BYTES {
        warn!("Rejected request with {header_bytes} header bytes");
        return StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE.into_response();
    }

    next.run(request).await
}
