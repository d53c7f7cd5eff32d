//! Revealing a path in the desktop's file manager.
//!
//! One opener per platform family, picked once from the OS name. Launching is
//! fire-and-forget: the file manager keeps running after the request returns.

use crate::error::file_manager::FileManagerError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use log::{debug, warn};
use tokio::process::Command as TokioCommand;

const XDG_OPEN: &str = "xdg-open";
const RUNDLL32: &str = "rundll32";
const WINDOWS_FILE_HANDLER: &str = "url.dll,FileProtocolHandler";
const MAC_OPEN: &str = "open";

pub trait FileManagerOpener: Send + Sync {
    /// Ask the platform to show `path`. Does not wait for the launched program.
    fn open(&self, path: &Path) -> Result<(), FileManagerError>;

    fn name(&self) -> &'static str;
}

/// Linux and the BSDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct XdgOpen;

#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsShell;

#[derive(Debug, Default, Clone, Copy)]
pub struct MacOpen;

/// Platforms without a known file manager launcher.
#[derive(Debug, Clone)]
pub struct Unsupported {
    pub platform: String,
}

impl FileManagerOpener for XdgOpen {
    fn open(&self, path: &Path) -> Result<(), FileManagerError> {
        launch(XDG_OPEN, &[], path)
    }

    fn name(&self) -> &'static str {
        XDG_OPEN
    }
}

impl FileManagerOpener for WindowsShell {
    fn open(&self, path: &Path) -> Result<(), FileManagerError> {
        launch(RUNDLL32, &[WINDOWS_FILE_HANDLER], path)
    }

    fn name(&self) -> &'static str {
        RUNDLL32
    }
}

impl FileManagerOpener for MacOpen {
    fn open(&self, path: &Path) -> Result<(), FileManagerError> {
        launch(MAC_OPEN, &[], path)
    }

    fn name(&self) -> &'static str {
        MAC_OPEN
    }
}

impl FileManagerOpener for Unsupported {
    #[track_caller]
    fn open(&self, path: &Path) -> Result<(), FileManagerError> {
        warn!(
            "Cannot open {} on unsupported platform '{}'",
            path.display(),
            self.platform
        );
        Err(FileManagerError::Unsupported {
            platform: self.platform.clone(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn name(&self) -> &'static str {
        "unsupported"
    }
}

/// Opener for an OS name as reported by `std::env::consts::OS`.
pub fn opener_for_platform(os: &str) -> Arc<dyn FileManagerOpener> {
    match os {
        "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Arc::new(XdgOpen),
        "windows" => Arc::new(WindowsShell),
        "macos" => Arc::new(MacOpen),
        other => Arc::new(Unsupported {
            platform: other.to_string(),
        }),
    }
}

#[track_caller]
fn launch(program: &'static str, args: &[&str], path: &Path) -> Result<(), FileManagerError> {
    debug!("Launching {program} for {}", path.display());

    // stdout carries native messaging frames; the child must not inherit it.
    TokioCommand::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_child| ())
        .map_err(|e| FileManagerError::Launch {
            program,
            path: path.to_path_buf(),
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}
