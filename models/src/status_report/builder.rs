use crate::error::model_error::ModelError;
use crate::status_report::{PLACEHOLDER_FIELD, ServerState, StatusReport};
use crate::ErrorLocation;

use std::panic::Location;

/// Builder for validated [`StatusReport`] values.
///
/// Untracked fields (`Rdfloaded`, `Downloadjs`) always hold the placeholder
/// the extension expects.
#[derive(Debug, Default)]
pub struct StatusReportBuilder {
    version: Option<String>,
    server_addr: Option<String>,
    server_state: Option<ServerState>,
    error: Option<String>,
}

impl StatusReportBuilder {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_server_addr(mut self, addr: impl Into<String>) -> Self {
        self.server_addr = Some(addr.into());
        self
    }

    pub fn with_server_state(mut self, state: ServerState) -> Self {
        self.server_state = Some(state);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Build the report.
    ///
    /// A `fail` report must carry an error text and an `ok` report must not;
    /// any report past the initial state must name the server address.
    #[track_caller]
    pub fn build(self) -> Result<StatusReport, ModelError> {
        let version = self.version.ok_or_else(|| ModelError::Validation {
            message: String::from("Version is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if version.trim().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Version cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let server_state = self.server_state.unwrap_or(ServerState::Initial);
        let error = self.error.unwrap_or_default();

        let server_addr = match (server_state, self.server_addr) {
            (ServerState::Initial, addr) => {
                addr.unwrap_or_else(|| PLACEHOLDER_FIELD.to_string())
            }
            (_, Some(addr)) if !addr.trim().is_empty() => addr,
            (_, _) => {
                return Err(ModelError::Validation {
                    message: String::from("Server address is required once a start was attempted"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        match server_state {
            ServerState::Fail if error.is_empty() => {
                return Err(ModelError::Validation {
                    message: String::from("A failed report must carry an error text"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            ServerState::Ok if !error.is_empty() => {
                return Err(ModelError::Validation {
                    message: format!("An ok report cannot carry an error text: {error}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            _ => {}
        }

        Ok(StatusReport {
            version,
            rdfloaded: PLACEHOLDER_FIELD.to_string(),
            serveraddr: server_addr,
            serverstate: server_state,
            downloadjs: PLACEHOLDER_FIELD.to_string(),
            error,
        })
    }
}
