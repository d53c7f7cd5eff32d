use crate::LOOPBACK_HOST;
use crate::error::dispatch::DispatchError;

use common::ErrorLocation;

use std::collections::HashMap;
use std::panic::Location;

const COMMAND_FIELD: &str = "command";
const ADDR_FIELD: &str = "addr";
const PORT_FIELD: &str = "port";

/// Command name that starts (or keeps) the HTTP file service.
pub const WEB_SERVER_COMMAND: &str = "web-server";

/// A decoded instruction from the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ensure the file service is listening on `addr`.
    WebServer { addr: String },

    /// Anything else, including a missing `command` field (empty name).
    Unknown(String),
}

impl Command {
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let name = fields.get(COMMAND_FIELD).map(String::as_str).unwrap_or("");

        match name {
            WEB_SERVER_COMMAND => Command::WebServer {
                addr: resolve_server_addr(fields),
            },
            other => Command::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Command::WebServer { .. } => WEB_SERVER_COMMAND,
            Command::Unknown(name) => name,
        }
    }
}

/// Bind address requested by a `web-server` command.
///
/// An explicit non-empty `addr` wins. Otherwise the loopback host is paired
/// with `port`; a missing port yields an address that fails to bind, which is
/// then reported back like any other bind failure.
pub fn resolve_server_addr(fields: &HashMap<String, String>) -> String {
    match fields.get(ADDR_FIELD).map(|a| a.trim()) {
        Some(addr) if !addr.is_empty() => addr.to_string(),
        _ => {
            let port = fields.get(PORT_FIELD).map(|p| p.trim()).unwrap_or("");
            format!("{LOOPBACK_HOST}:{port}")
        }
    }
}

/// Turn a delimiter-stripped frame payload into the command's flat field map.
///
/// The payload is the body of a JSON string literal whose value is itself a
/// JSON object, so it is unescaped first and parsed second.
///
/// # Errors
///
/// - [`DispatchError::Unescape`] if the payload is not valid UTF-8 or not a
///   valid string-literal body
/// - [`DispatchError::Parse`] if the unescaped text is not a flat object of
///   string values
#[track_caller]
pub fn decode_command(message: &[u8]) -> Result<HashMap<String, String>, DispatchError> {
    let body = std::str::from_utf8(message).map_err(|e| DispatchError::Unescape {
        message: format!("payload is not UTF-8: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let inner: String =
        serde_json::from_str(&format!("\"{body}\"")).map_err(|e| DispatchError::Unescape {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    serde_json::from_str::<HashMap<String, String>>(&inner)
        .map_err(|e| DispatchError::parse(format!("{e} in {inner}")))
}
