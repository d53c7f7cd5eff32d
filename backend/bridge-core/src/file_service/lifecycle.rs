use crate::error::server::ServerError;
use crate::file_service::handle::ServerHandle;
use crate::file_service::routes::{RouteContext, build_router};

use common::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::io::Error as IoError;
use std::net::SocketAddr;
use std::panic::Location;
use std::time::Duration;

use axum::Router;
use log::{error, info, warn};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::timeout;

/// What [`FileService::ensure_running`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Started(SocketAddr),
    AlreadyRunning(SocketAddr),
    Replaced {
        previous: String,
        local_addr: SocketAddr,
    },
}

impl LaunchOutcome {
    pub fn local_addr(&self) -> SocketAddr {
        match self {
            LaunchOutcome::Started(addr)
            | LaunchOutcome::AlreadyRunning(addr)
            | LaunchOutcome::Replaced {
                local_addr: addr, ..
            } => *addr,
        }
    }
}

impl Display for LaunchOutcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        match self {
            LaunchOutcome::Started(addr) => write!(formatter, "started on {addr}"),
            LaunchOutcome::AlreadyRunning(addr) => write!(formatter, "already running on {addr}"),
            LaunchOutcome::Replaced {
                previous,
                local_addr,
            } => write!(formatter, "moved from {previous} to {local_addr}"),
        }
    }
}

/// Owner of the single active file service instance.
pub struct FileService {
    handle: Option<ServerHandle>,
    settle_interval: Duration,
    context: RouteContext,
}

impl FileService {
    /// # Arguments
    ///
    /// * `settle_interval` - Longest wait for a new listener to acknowledge its bind
    /// * `context` - Collaborators shared by every route
    pub fn new(settle_interval: Duration, context: RouteContext) -> Self {
        Self {
            handle: None,
            settle_interval,
            context,
        }
    }

    /// Make sure an instance is serving at `addr`.
    ///
    /// - No instance: start one.
    /// - Instance at a different address: signal it to stop (without waiting
    ///   for in-flight requests), then start the new one.
    /// - Instance already at `addr`: no-op.
    ///
    /// If the replacement fails to start, no instance is active afterwards.
    ///
    /// # Errors
    ///
    /// - [`ServerError::Bind`] if the listener cannot bind
    /// - [`ServerError::Timeout`] if no bind acknowledgment arrives within the
    ///   settle interval
    /// - [`ServerError::Start`] if the serving task ended before acknowledging
    pub async fn ensure_running(&mut self, addr: &str) -> Result<LaunchOutcome, ServerError> {
        let mut previous = None;

        if let Some(handle) = self.handle.take() {
            if handle.requested_addr() == addr && handle.is_running() {
                let local_addr = handle.local_addr();
                self.handle = Some(handle);
                return Ok(LaunchOutcome::AlreadyRunning(local_addr));
            }

            if handle.is_running() {
                previous = Some(handle.requested_addr().to_string());
                handle.shutdown();
            } else {
                warn!(
                    "File service at {} had stopped on its own, starting a new one",
                    handle.requested_addr()
                );
            }
        }

        let handle = start_server(addr, build_router(self.context.clone()), self.settle_interval)
            .await?;
        let local_addr = handle.local_addr();
        self.handle = Some(handle);

        Ok(match previous {
            Some(previous) => LaunchOutcome::Replaced {
                previous,
                local_addr,
            },
            None => LaunchOutcome::Started(local_addr),
        })
    }

    /// Address of the active instance, if one is serving.
    pub fn active_addr(&self) -> Option<SocketAddr> {
        self.handle
            .as_ref()
            .filter(|handle| handle.is_running())
            .map(ServerHandle::local_addr)
    }
}

/// Spawn a serving task for `addr` and wait for its bind acknowledgment.
///
/// The caller is never blocked on requests: serving happens in the spawned
/// task. Only the bind outcome is awaited, bounded by `settle_interval`.
async fn start_server(
    addr: &str,
    router: Router,
    settle_interval: Duration,
) -> Result<ServerHandle, ServerError> {
    let (bound_tx, bound_rx) = oneshot::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(serve(addr.to_string(), router, bound_tx, shutdown_rx));

    match timeout(settle_interval, bound_rx).await {
        Ok(Ok(Ok(local_addr))) => Ok(ServerHandle::new(
            addr.to_string(),
            local_addr,
            shutdown_tx,
            task,
        )),
        Ok(Ok(Err(e))) => Err(ServerError::bind(addr, &e)),
        Ok(Err(_)) => Err(ServerError::Start {
            addr: addr.to_string(),
            message: "file service task ended before binding".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
        Err(_) => {
            task.abort();
            Err(ServerError::Timeout {
                addr: addr.to_string(),
                message: format!("listener did not bind within {settle_interval:?}"),
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

async fn serve(
    addr: String,
    router: Router,
    bound_tx: oneshot::Sender<Result<SocketAddr, IoError>>,
    shutdown_rx: oneshot::Receiver<()>,
) {
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            let _ = bound_tx.send(Err(e));
            return;
        }
    };

    let local_addr = match listener.local_addr() {
        Ok(local_addr) => local_addr,
        Err(e) => {
            let _ = bound_tx.send(Err(e));
            return;
        }
    };

    if bound_tx.send(Ok(local_addr)).is_err() {
        warn!("Nobody is waiting for the file service at {addr}, not serving");
        return;
    }

    info!("File service listening on {local_addr}");

    let result = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = shutdown_rx.await;
    })
    .await;

    match result {
        Ok(()) => info!("File service at {local_addr} stopped"),
        Err(e) => error!("File service at {local_addr} failed: {e}"),
    }
}
