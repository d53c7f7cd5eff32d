use crate::support::{TEST_SETTLE, free_port, http_client, test_context};

use bridge_core::dispatch::CommandDispatcher;
use bridge_core::file_service::FileService;
use bridge_core::native_messaging::{FrameReader, FrameWriter};

use models::{ServerState, StatusReport};

use std::fs;

use tempfile::tempdir;

fn command_body(json: &str) -> Vec<u8> {
    // The extension's double stringification, minus the outer quotes.
    json.replace('"', "\\\"").into_bytes()
}

/// **VALUE**: A `web-server` command with a port starts the service, writes
/// one `ok` report frame, and the service answers on that port.
///
/// **WHY THIS MATTERS**: This is the whole handshake the extension performs at
/// startup; it decides whether saving works at all.
///
/// **BUG THIS CATCHES**: Would catch a report written before the listener is
/// bound, or a report with the wrong field names.
#[tokio::test]
async fn given_port_command_when_dispatched_then_ok_report_and_service_answers() {
    // GIVEN
    let port = free_port();
    let (host_out, extension_in) = tokio::io::duplex(4096);
    let mut dispatcher = CommandDispatcher::new(
        FrameWriter::new(host_out),
        FileService::new(TEST_SETTLE, test_context()),
    );
    let body = command_body(&format!(r#"{{"command":"web-server","port":"{port}"}}"#));

    // WHEN
    let report = dispatcher
        .dispatch(&body)
        .await
        .expect("dispatch succeeds")
        .expect("web-server reports");

    // THEN: The report frame on the wire matches
    let mut reader = FrameReader::new(extension_in);
    let frame = reader.next_frame().await.expect("report frame");
    let wire: serde_json::Value = serde_json::from_slice(&frame).expect("json report");
    assert_eq!(wire["Serverstate"], "ok");
    assert_eq!(wire["Serveraddr"], format!("127.0.0.1:{port}"));
    assert_eq!(wire["Error"], "");
    assert_eq!(wire["Rdfloaded"], "0");
    assert_eq!(wire["Downloadjs"], "0");
    assert_eq!(wire["Version"], env!("CARGO_PKG_VERSION"));
    assert!(report.is_ok());

    // THEN: The service answers
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("x.txt");
    fs::write(&file, "x").expect("write");
    let answer = http_client()
        .post(format!("http://127.0.0.1:{port}/isfile/"))
        .form(&[("path", file.to_str().expect("utf-8 path"))])
        .send()
        .await
        .expect("service answers")
        .text()
        .await
        .expect("body");
    assert_eq!(answer, "yes");
}

/// **VALUE**: A bind failure is reported to the extension, not swallowed.
#[tokio::test]
async fn given_occupied_addr_when_dispatched_then_fail_report_with_error() {
    // GIVEN
    let blocker = std::net::TcpListener::bind("127.0.0.1:0").expect("bind blocker");
    let addr = blocker.local_addr().expect("addr").to_string();
    let (host_out, extension_in) = tokio::io::duplex(4096);
    let mut dispatcher = CommandDispatcher::new(
        FrameWriter::new(host_out),
        FileService::new(TEST_SETTLE, test_context()),
    );
    let body = command_body(&format!(r#"{{"command":"web-server","addr":"{addr}"}}"#));

    // WHEN
    dispatcher.dispatch(&body).await.expect("dispatch succeeds");

    // THEN
    let frame = FrameReader::new(extension_in)
        .next_frame()
        .await
        .expect("report frame");
    let report: StatusReport = serde_json::from_slice(&frame).expect("json report");
    assert_eq!(report.serverstate, ServerState::Fail);
    assert_eq!(report.serveraddr, addr);
    assert!(!report.error.is_empty());
}

/// **VALUE**: Unknown commands produce no frame.
///
/// **BUG THIS CATCHES**: Would catch a stray report confusing the extension's
/// request/response pairing.
#[tokio::test]
async fn given_unknown_command_when_dispatched_then_nothing_written() {
    let (host_out, _extension_in) = tokio::io::duplex(4096);
    let mut dispatcher = CommandDispatcher::new(
        FrameWriter::new(host_out),
        FileService::new(TEST_SETTLE, test_context()),
    );

    let result = dispatcher
        .dispatch(&command_body(r#"{"command":"rdf-path"}"#))
        .await
        .expect("dispatch succeeds");

    assert!(result.is_none());
    let (writer, service) = dispatcher.into_parts();
    drop(writer);
    assert!(service.active_addr().is_none());
}
