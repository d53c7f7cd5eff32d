//! On-demand loopback HTTP file service.
//!
//! At most one instance runs at a time. [`FileService::ensure_running`] starts
//! it, replaces it when the requested address changes, and leaves it alone
//! when the address is unchanged.
//!
//! # Security
//!
//! - Connections from non-loopback peers are rejected with 403
//! - Request headers are capped at [`MAX_HEADER_BYTES`]
//! - Every request is bounded by [`REQUEST_TIMEOUT`]

mod guard;
mod handle;
pub mod handlers;
mod lifecycle;
mod response;
mod routes;

pub use handle::ServerHandle;
pub use lifecycle::{FileService, LaunchOutcome};
pub use response::RouteError;
pub use routes::{RouteContext, build_router};

use std::time::Duration;

/// Upper bound on reading a request and writing its response.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on the combined size of request header names and values.
pub const MAX_HEADER_BYTES: usize = 1 << 20;

/// How long a replaced instance may keep draining before it is aborted.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
