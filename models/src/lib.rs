//! Wire records exchanged with the browser extension.
//!
//! These are plain data types with no I/O. `bridge-core` fills them in and
//! serializes them onto the native-messaging channel.

pub mod error;
pub mod status_report;

pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use status_report::builder::StatusReportBuilder;
pub use status_report::{PLACEHOLDER_FIELD, ServerState, StatusReport};

#[cfg(test)]
mod tests;
