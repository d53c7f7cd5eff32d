use crate::dispatch::{Command, decode_command, resolve_server_addr};
use crate::error::dispatch::DispatchError;

use std::collections::HashMap;

fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// **VALUE**: The escaped object the extension sends decodes into its fields.
///
/// **WHY THIS MATTERS**: The extension stringifies the command object twice;
/// after the outer quotes are stripped, every inner quote is still escaped.
///
/// **BUG THIS CATCHES**: Would catch parsing the body directly as JSON, which
/// fails on `\"`.
#[test]
fn given_escaped_command_body_when_decoded_then_fields_extracted() {
    // GIVEN: The body between the outer quotes
    let body = br#"{\"command\":\"web-server\",\"port\":\"9900\"}"#;

    // WHEN: Decoding
    let decoded = decode_command(body).expect("valid command");

    // THEN: Both fields present
    assert_eq!(decoded.get("command").map(String::as_str), Some("web-server"));
    assert_eq!(decoded.get("port").map(String::as_str), Some("9900"));
}

/// **VALUE**: Text that is not an object after unescaping is a parse error.
///
/// **BUG THIS CATCHES**: Would catch a decoder that returns an empty map and
/// lets a garbage message look like an unknown command.
#[test]
fn given_non_object_body_when_decoded_then_parse_error() {
    assert!(matches!(
        decode_command(b"not json"),
        Err(DispatchError::Parse { .. })
    ));
}

/// **VALUE**: An invalid escape sequence is reported as an unescape failure.
#[test]
fn given_bad_escape_when_decoded_then_unescape_error() {
    assert!(matches!(
        decode_command(br"\q"),
        Err(DispatchError::Unescape { .. })
    ));
}

/// **VALUE**: An explicit `addr` wins over `port`.
///
/// **BUG THIS CATCHES**: Would catch always building `127.0.0.1:<port>`.
#[test]
fn given_addr_and_port_when_resolved_then_addr_used() {
    let resolved = resolve_server_addr(&fields(&[("addr", "localhost:8000"), ("port", "1")]));
    assert_eq!(resolved, "localhost:8000");
}

/// **VALUE**: With only `port`, the loopback host is used.
#[test]
fn given_only_port_when_resolved_then_loopback_with_port() {
    let resolved = resolve_server_addr(&fields(&[("addr", ""), ("port", "9900")]));
    assert_eq!(resolved, "127.0.0.1:9900");
}

/// **VALUE**: With neither field, the resolved address has an empty port and
/// will fail to bind, which is then reported like any bind failure.
#[test]
fn given_neither_addr_nor_port_when_resolved_then_empty_port() {
    assert_eq!(resolve_server_addr(&HashMap::new()), "127.0.0.1:");
}

/// **VALUE**: Only `web-server` is a recognized command.
#[test]
fn given_various_command_names_when_classified_then_only_web_server_recognized() {
    let web = Command::from_fields(&fields(&[("command", "web-server"), ("port", "1")]));
    assert_eq!(
        web,
        Command::WebServer {
            addr: "127.0.0.1:1".to_string()
        }
    );

    let other = Command::from_fields(&fields(&[("command", "shutdown")]));
    assert_eq!(other, Command::Unknown("shutdown".to_string()));

    let missing = Command::from_fields(&HashMap::new());
    assert_eq!(missing.name(), "");
}
