use crate::{ServerState, StatusReportBuilder};

use serde_json::Value;

/// **VALUE**: Verifies the serialized field names match what the extension reads.
///
/// **WHY THIS MATTERS**: The extension looks up `Serverstate`, `Serveraddr` and
/// friends by exact name. A serde rename slip makes every start look like it
/// never answered.
///
/// **BUG THIS CATCHES**: Would catch a change of `rename_all` or a renamed
/// struct field.
#[test]
fn given_report_when_serialized_then_uses_capitalized_wire_names() {
    // GIVEN: A failed report
    let report = StatusReportBuilder::default()
        .with_version("1.7.1")
        .with_server_addr("127.0.0.1:9900")
        .with_server_state(ServerState::Fail)
        .with_error("address already in use")
        .build()
        .unwrap();

    // WHEN: Serializing to wire bytes
    let bytes = report.to_wire_bytes().unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();

    // THEN: Exactly the six expected keys with string values
    let object = json.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["Downloadjs", "Error", "Rdfloaded", "Serveraddr", "Serverstate", "Version"]
    );
    assert_eq!(json["Serverstate"], "fail");
    assert_eq!(json["Error"], "address already in use");
}

/// **VALUE**: Verifies each server state serializes to its wire token.
///
/// **BUG THIS CATCHES**: Would catch an enum variant losing its serde rename
/// (e.g. emitting `"Ok"` instead of `"ok"`).
#[test]
fn given_each_state_when_serialized_then_emits_wire_token() {
    let cases = [
        (ServerState::Initial, "\"0\""),
        (ServerState::Ok, "\"ok\""),
        (ServerState::Fail, "\"fail\""),
    ];

    for (state, expected) in cases {
        assert_eq!(serde_json::to_string(&state).unwrap(), expected);
    }
}
