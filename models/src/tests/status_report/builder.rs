use crate::{ModelError, PLACEHOLDER_FIELD, ServerState, StatusReportBuilder};

/// **VALUE**: Verifies a successful start produces an `ok` report with an empty error.
///
/// **WHY THIS MATTERS**: The extension treats any non-empty `Error` as a failure
/// banner. A stray placeholder in `Error` would show an error after every
/// successful start.
///
/// **BUG THIS CATCHES**: Would catch the builder defaulting `Error` to the
/// `"0"` placeholder instead of an empty string.
#[test]
fn given_ok_state_when_build_then_error_is_empty() {
    // GIVEN: A builder describing a started server
    let builder = StatusReportBuilder::default()
        .with_version("1.7.1")
        .with_server_addr("127.0.0.1:9900")
        .with_server_state(ServerState::Ok);

    // WHEN: Building
    let report = builder.build().expect("ok report should build");

    // THEN: Error is empty and the untracked fields hold the placeholder
    assert!(report.is_ok());
    assert_eq!(report.error, "");
    assert_eq!(report.serveraddr, "127.0.0.1:9900");
    assert_eq!(report.rdfloaded, PLACEHOLDER_FIELD);
    assert_eq!(report.downloadjs, PLACEHOLDER_FIELD);
}

/// **VALUE**: Verifies a `fail` report cannot be built without an error text.
///
/// **WHY THIS MATTERS**: The error text is the only diagnostic the user sees
/// when the port is taken. An empty one leaves them guessing.
///
/// **BUG THIS CATCHES**: Would catch the dispatcher forgetting to copy the
/// bind error into the report.
#[test]
fn given_fail_state_without_error_when_build_then_validation_error() {
    // GIVEN: A failed report with no error text
    let builder = StatusReportBuilder::default()
        .with_version("1.7.1")
        .with_server_addr("127.0.0.1:9900")
        .with_server_state(ServerState::Fail);

    // WHEN: Building
    let result = builder.build();

    // THEN: Validation fails
    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

/// **VALUE**: Verifies an `ok` report rejects an error text.
///
/// **WHY THIS MATTERS**: A contradictory report (ok + error) would be shown as
/// a failure by the extension even though the server is up.
///
/// **BUG THIS CATCHES**: Would catch state/error mix-ups in the dispatcher.
#[test]
fn given_ok_state_with_error_when_build_then_validation_error() {
    // GIVEN: An ok report carrying an error
    let builder = StatusReportBuilder::default()
        .with_version("1.7.1")
        .with_server_addr("127.0.0.1:9900")
        .with_server_state(ServerState::Ok)
        .with_error("address in use");

    // WHEN / THEN: Building fails
    assert!(builder.build().is_err());
}

/// **VALUE**: Verifies the address is mandatory once a start was attempted.
///
/// **WHY THIS MATTERS**: The extension uses `Serveraddr` to build every file
/// URL. A missing address silently breaks all later requests.
///
/// **BUG THIS CATCHES**: Would catch reports built from an unresolved command.
#[test]
fn given_missing_addr_when_build_after_attempt_then_validation_error() {
    // GIVEN: Ok and fail builders without address
    for state in [ServerState::Ok, ServerState::Fail] {
        let builder = StatusReportBuilder::default()
            .with_version("1.7.1")
            .with_server_state(state)
            .with_error(if state == ServerState::Fail { "boom" } else { "" });

        // WHEN / THEN: Building fails
        assert!(builder.build().is_err(), "state {state:?} needs an address");
    }
}

/// **VALUE**: Verifies the initial report defaults every field to the placeholder.
///
/// **BUG THIS CATCHES**: Would catch the builder requiring an address for the
/// pre-start report.
#[test]
fn given_initial_state_when_build_then_placeholders_fill_fields() {
    // GIVEN / WHEN: Only a version
    let report = StatusReportBuilder::default()
        .with_version("1.7.1")
        .build()
        .expect("initial report should build");

    // THEN: Placeholder everywhere except version
    assert_eq!(report.serverstate, ServerState::Initial);
    assert_eq!(report.serveraddr, PLACEHOLDER_FIELD);
}

/// **VALUE**: Verifies version is required and must not be blank.
///
/// **BUG THIS CATCHES**: Would catch reports that the extension's version
/// compatibility check cannot read.
#[test]
fn given_blank_or_missing_version_when_build_then_validation_error() {
    assert!(StatusReportBuilder::default().build().is_err());
    assert!(
        StatusReportBuilder::default()
            .with_version("  ")
            .build()
            .is_err()
    );
}
