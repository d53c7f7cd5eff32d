use native_host::error::HostError;
use native_host::logger::initialize as LoggerInitialize;
use native_host::startup::{load_config, prepare_log_dir};

use bridge_core::{BACKEND_VERSION, RunMode, run_host};

use std::env::args;
use std::process::ExitCode;

use log::{error, info, warn};

/// Exit status when the log file cannot be opened.
const LOGGER_FAILURE_EXIT: u8 = 255;

#[tokio::main]
async fn main() -> ExitCode {
    let mode = RunMode::from_args(args().skip(1));
    let (config, config_error) = load_config(None);

    let logger = prepare_log_dir(&config).and_then(|log_dir| LoggerInitialize(&log_dir));
    if let Err(e) = logger {
        eprintln!("{e}");
        return ExitCode::from(LOGGER_FAILURE_EXIT);
    }

    if let Some(e) = config_error {
        warn!("{e}, using defaults");
    }

    info!("ScrapBee backend {BACKEND_VERSION} starting ({mode:?})");

    match run_host(mode, &config, tokio::io::stdin(), tokio::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", HostError::from(e));
            ExitCode::FAILURE
        }
    }
}
