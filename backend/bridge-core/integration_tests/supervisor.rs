use crate::support::{free_port, http_client};

use bridge_core::native_messaging::{FrameReader, FrameWriter};
use bridge_core::{BridgeConfig, RunMode, run_host};

use std::time::Duration;

use tokio::time::timeout;

fn extension_message(json: &str) -> Vec<u8> {
    // JSON.stringify applied twice: the frame is a quoted, escaped string.
    serde_json::to_vec(&json.to_string()).expect("string serializes")
}

/// **VALUE**: End to end over in-memory stdio: a framed `web-server` message
/// yields a report frame and a live service, and empty frames are skipped.
///
/// **WHY THIS MATTERS**: This is exactly what the browser does after launching
/// the host.
///
/// **BUG THIS CATCHES**: Would catch the loop stalling on an empty frame or
/// writing log text onto the frame channel.
#[tokio::test]
async fn given_framed_command_when_host_runs_then_report_frame_and_service_live() {
    // GIVEN: The host running on duplex pipes
    let port = free_port();
    let (browser_out, host_in) = tokio::io::duplex(4096);
    let (host_out, browser_in) = tokio::io::duplex(4096);
    let config = BridgeConfig {
        poll_interval_ms: 0,
        ..BridgeConfig::default()
    };
    let host = tokio::spawn(async move {
        run_host(RunMode::Listen, &config, host_in, host_out).await
    });

    // WHEN: An empty frame, then the command
    let mut to_host = FrameWriter::new(browser_out);
    to_host.write_frame(b"").await.expect("write empty frame");
    to_host
        .write_frame(&extension_message(&format!(
            r#"{{"command":"web-server","port":"{port}"}}"#
        )))
        .await
        .expect("write command");

    // THEN: One ok report arrives
    let mut from_host = FrameReader::new(browser_in);
    let frame = timeout(Duration::from_secs(5), from_host.next_frame())
        .await
        .expect("report within deadline")
        .expect("report frame");
    let report: serde_json::Value = serde_json::from_slice(&frame).expect("json report");
    assert_eq!(report["Serverstate"], "ok");

    let answer = http_client()
        .get(format!("http://127.0.0.1:{port}/isfile/?path=/no/such/file"))
        .send()
        .await
        .expect("service answers")
        .text()
        .await
        .expect("body");
    assert_eq!(answer, "no");

    host.abort();
}

/// **VALUE**: Starting with `web-server` serves at the configured address
/// before any message arrives.
#[tokio::test]
async fn given_web_server_mode_when_host_runs_then_startup_report_sent() {
    let addr = format!("127.0.0.1:{}", free_port());
    let (_browser_out, host_in) = tokio::io::duplex(64);
    let (host_out, browser_in) = tokio::io::duplex(4096);
    let config = BridgeConfig {
        default_addr: addr.clone(),
        ..BridgeConfig::default()
    };
    let host = tokio::spawn(async move {
        run_host(RunMode::WebServer, &config, host_in, host_out).await
    });

    let frame = timeout(Duration::from_secs(5), FrameReader::new(browser_in).next_frame())
        .await
        .expect("report within deadline")
        .expect("report frame");
    let report: serde_json::Value = serde_json::from_slice(&frame).expect("json report");
    assert_eq!(report["Serverstate"], "ok");
    assert_eq!(report["Serveraddr"], addr.as_str());

    host.abort();
}

/// **VALUE**: `init` returns at once without touching the pipes.
#[tokio::test]
async fn given_init_mode_when_host_runs_then_returns_immediately() {
    let (_a, host_in) = tokio::io::duplex(64);
    let (host_out, _b) = tokio::io::duplex(64);

    let result = timeout(
        Duration::from_secs(1),
        run_host(RunMode::Init, &BridgeConfig::default(), host_in, host_out),
    )
    .await
    .expect("returns promptly");

    assert!(result.is_ok());
}
