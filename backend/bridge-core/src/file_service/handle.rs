//! Handle to one running file service instance.

use crate::file_service::SHUTDOWN_GRACE;

use std::net::SocketAddr;

use log::{info, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Ownership of a running file service.
///
/// Dropping the handle does not stop the server; call [`ServerHandle::shutdown`].
pub struct ServerHandle {
    requested_addr: String,
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    pub(crate) fn new(
        requested_addr: String,
        local_addr: SocketAddr,
        shutdown_tx: oneshot::Sender<()>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            requested_addr,
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }

    /// Address string the instance was started for, as the extension sent it.
    pub fn requested_addr(&self) -> &str {
        &self.requested_addr
    }

    /// Address the listener actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Whether the serving task is still alive.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signal the instance to stop accepting connections without waiting for
    /// it to drain.
    ///
    /// A detached reaper aborts the serving task if it is still alive after
    /// [`SHUTDOWN_GRACE`].
    pub fn shutdown(mut self) {
        info!(
            "Shutting down file service at {} ({})",
            self.requested_addr, self.local_addr
        );

        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver is gone only if the task already ended.
            let _ = tx.send(());
        }

        let addr = self.local_addr;
        let mut task = self.task;
        tokio::spawn(async move {
            if timeout(SHUTDOWN_GRACE, &mut task).await.is_err() {
                warn!("File service at {addr} did not drain within {SHUTDOWN_GRACE:?}, aborting");
                task.abort();
            }
        });
    }
}
