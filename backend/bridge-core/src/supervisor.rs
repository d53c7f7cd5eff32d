//! Process supervisor: the read-dispatch loop behind the browser's stdio pipes.

use crate::config::BridgeConfig;
use crate::dispatch::{CommandDispatcher, WEB_SERVER_COMMAND};
use crate::error::CoreError;
use crate::file_service::{FileService, RouteContext};
use crate::native_messaging::{FrameReader, FrameWriter, strip_delimiters};

use std::time::Duration;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, error, info, trace};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::sleep as TokioSleep;

pub const INIT_ARG: &str = "init";

const IDLE_BACKOFF_INITIAL: Duration = Duration::from_millis(50);
const IDLE_BACKOFF_MAX: Duration = Duration::from_secs(2);

/// How the process was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Wait for commands from the extension.
    Listen,
    /// Start the file service at the configured address, then listen.
    WebServer,
    /// Create the log file and exit.
    Init,
}

impl RunMode {
    /// Pick the mode from the arguments after the program name.
    ///
    /// Only the first argument is inspected. Browsers pass the extension
    /// origin or the manifest path there, which selects [`RunMode::Listen`].
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match args.into_iter().next() {
            Some(arg) if arg.as_ref() == WEB_SERVER_COMMAND => RunMode::WebServer,
            Some(arg) if arg.as_ref() == INIT_ARG => RunMode::Init,
            _ => RunMode::Listen,
        }
    }
}

/// Run the host until the task is cancelled.
///
/// Frames are read from `reader` one at a time; each is stripped of its
/// delimiters and dispatched, and any report goes out on `writer`. Errors for
/// a single frame are logged and the loop carries on. An idle input stream
/// is polled again with exponential backoff.
///
/// # Errors
///
/// Only setup can fail: the HTTP client for the download route could not be
/// built. [`RunMode::Init`] returns immediately.
pub async fn run_host<R, W>(
    mode: RunMode,
    config: &BridgeConfig,
    reader: R,
    writer: W,
) -> Result<(), CoreError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if mode == RunMode::Init {
        info!("Initialized, exiting");
        return Ok(());
    }

    let file_service = FileService::new(config.settle_interval(), RouteContext::from_platform()?);
    let mut dispatcher = CommandDispatcher::new(FrameWriter::new(writer), file_service);

    if mode == RunMode::WebServer {
        info!("Started with {WEB_SERVER_COMMAND}, serving at {}", config.default_addr);
        if let Err(e) = dispatcher.start_web_server(&config.default_addr).await {
            error!("Startup Error: {e}");
        }
    }

    let mut reader = FrameReader::new(reader);
    let mut idle = IdleState::new();
    let poll_interval = config.poll_interval();

    info!("Waiting for messages");

    loop {
        match reader.next_frame().await {
            Ok(payload) => {
                idle.on_frame();
                handle_frame(&mut dispatcher, &payload).await;
            }
            Err(e) if e.is_not_ready() => {
                let (wait, first) = idle.on_idle();
                if first {
                    info!("Input stream idle, polling with backoff");
                }
                trace!("No input, polling again in {wait:?}");
                TokioSleep(wait).await;
                continue;
            }
            Err(e) => error!("Read Error: {e}"),
        }

        if !poll_interval.is_zero() {
            TokioSleep(poll_interval).await;
        }
    }
}

async fn handle_frame<W>(dispatcher: &mut CommandDispatcher<W>, payload: &[u8])
where
    W: AsyncWrite + Unpin,
{
    if payload.is_empty() {
        debug!("Skipping empty frame");
        return;
    }

    let message = match strip_delimiters(payload) {
        Ok(message) => message,
        Err(e) => {
            error!("Frame Error: {e}");
            return;
        }
    };

    match dispatcher.dispatch(message).await {
        Ok(Some(report)) => debug!("Reported server state {:?}", report.serverstate),
        Ok(None) => {}
        Err(e) => error!("Dispatch Error: {e}"),
    }
}

/// Backoff for an idle input stream, plus whether the current idle
/// stretch has been logged yet.
pub(crate) struct IdleState {
    backoff: ExponentialBackoff,
    announced: bool,
}

impl IdleState {
    pub(crate) fn new() -> Self {
        Self {
            backoff: ExponentialBackoff {
                initial_interval: IDLE_BACKOFF_INITIAL,
                current_interval: IDLE_BACKOFF_INITIAL,
                max_interval: IDLE_BACKOFF_MAX,
                max_elapsed_time: None,
                ..Default::default()
            },
            announced: false,
        }
    }

    /// A frame arrived: the next idle stretch starts from scratch.
    pub(crate) fn on_frame(&mut self) {
        self.backoff.reset();
        self.announced = false;
    }

    /// The wait before polling again, and `true` only for the first idle
    /// poll since startup or the last frame.
    pub(crate) fn on_idle(&mut self) -> (Duration, bool) {
        let wait = self.backoff.next_backoff().unwrap_or(IDLE_BACKOFF_MAX);
        let first = !self.announced;
        self.announced = true;
        (wait, first)
    }
}
