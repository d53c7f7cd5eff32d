//! Command dispatcher.
//!
//! Turns frame payloads into [`Command`]s, drives the [`FileService`] and
//! reports the outcome of every `web-server` command back to the extension as
//! exactly one [`StatusReport`] frame.
//!
//! Commands are processed one at a time from the supervisor's read loop, so
//! the file service handle needs no locking.

mod command;

pub use command::{Command, WEB_SERVER_COMMAND, decode_command, resolve_server_addr};

use crate::BACKEND_VERSION;
use crate::error::dispatch::DispatchError;
use crate::file_service::FileService;
use crate::native_messaging::FrameWriter;

use models::{ServerState, StatusReport, StatusReportBuilder};

use log::{error, info};
use tokio::io::AsyncWrite;

pub struct CommandDispatcher<W> {
    writer: FrameWriter<W>,
    file_service: FileService,
}

impl<W: AsyncWrite + Unpin> CommandDispatcher<W> {
    pub fn new(writer: FrameWriter<W>, file_service: FileService) -> Self {
        Self {
            writer,
            file_service,
        }
    }

    /// Handle one delimiter-stripped message.
    ///
    /// # Returns
    ///
    /// The report that was written for a `web-server` command, `None` for an
    /// ignored command.
    ///
    /// # Errors
    ///
    /// Decode failures and failures to write the report frame. A server that
    /// fails to start is not an error here; it is reported to the extension.
    pub async fn dispatch(&mut self, message: &[u8]) -> Result<Option<StatusReport>, DispatchError> {
        let fields = decode_command(message)?;
        let command = Command::from_fields(&fields);
        info!("command={}", command.name());

        match command {
            Command::WebServer { addr } => self.start_web_server(&addr).await.map(Some),
            Command::Unknown(name) => {
                info!("Ignoring unsupported command '{name}'");
                Ok(None)
            }
        }
    }

    /// Ensure the file service runs at `addr` and report the outcome.
    pub async fn start_web_server(&mut self, addr: &str) -> Result<StatusReport, DispatchError> {
        info!("Starting file service at {addr}");

        let builder = StatusReportBuilder::default()
            .with_version(BACKEND_VERSION)
            .with_server_addr(addr);

        let report = match self.file_service.ensure_running(addr).await {
            Ok(outcome) => {
                info!("File service {outcome}");
                builder.with_server_state(ServerState::Ok).build()?
            }
            Err(e) => {
                error!("Listen Error: {e}");
                builder
                    .with_server_state(ServerState::Fail)
                    .with_error(e.reason())
                    .build()?
            }
        };

        self.writer.write_frame(&report.to_wire_bytes()?).await?;
        Ok(report)
    }

    pub fn into_parts(self) -> (FrameWriter<W>, FileService) {
        (self.writer, self.file_service)
    }
}
