pub mod builder;

use crate::error::model_error::ModelError;

use serde::{Deserialize, Serialize};

/// Value the extension expects in fields the backend does not track.
pub const PLACEHOLDER_FIELD: &str = "0";

/// State of the HTTP file service as reported to the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerState {
    /// No start attempt has completed yet.
    #[serde(rename = "0")]
    Initial,
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "fail")]
    Fail,
}

/// Acknowledgment sent back after every `web-server` command.
///
/// Field names are capitalized on the wire because the extension reads them
/// verbatim (`Version`, `Serveraddr`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusReport {
    pub version: String,
    pub rdfloaded: String,
    pub serveraddr: String,
    pub serverstate: ServerState,
    pub downloadjs: String,
    pub error: String,
}

impl StatusReport {
    pub fn is_ok(&self) -> bool {
        self.serverstate == ServerState::Ok
    }

    /// JSON bytes ready to be framed onto the native-messaging channel.
    #[track_caller]
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>, ModelError> {
        Ok(serde_json::to_vec(self)?)
    }
}
