use crate::error::HostError;

use bridge_core::error::CoreError;
use bridge_core::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Core errors keep their text when they become host errors.
///
/// **WHY THIS MATTERS**: The log line written before exit is all a user gets
/// when the host dies at startup.
#[test]
fn given_core_error_when_converted_then_runtime_error_keeps_message() {
    // GIVEN
    let core = CoreError::from(ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: "bad value".to_string(),
    });

    // WHEN
    let host = HostError::from(core);

    // THEN
    match &host {
        HostError::Runtime { message, .. } => assert!(message.contains("bad value")),
        other => panic!("expected Runtime, got {other:?}"),
    }
    assert!(host.to_string().starts_with("Runtime Error: "));
}
