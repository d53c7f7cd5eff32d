use crate::support::{TEST_SETTLE, free_port, http_client, test_context, wait_until_closed};

use bridge_core::error::server::ServerError;
use bridge_core::file_service::{FileService, LaunchOutcome};

use std::net::TcpListener as StdTcpListener;

/// **VALUE**: Asking twice for the same address keeps the first instance.
///
/// **WHY THIS MATTERS**: The extension sends `web-server` on every startup and
/// settings save. Restarting each time would drop in-flight downloads.
///
/// **BUG THIS CATCHES**: Would catch `ensure_running()` restarting (and
/// failing to rebind) on an unchanged address.
#[tokio::test]
async fn given_running_service_when_same_addr_requested_then_already_running() {
    // GIVEN
    let addr = format!("127.0.0.1:{}", free_port());
    let mut service = FileService::new(TEST_SETTLE, test_context());
    let first = service.ensure_running(&addr).await.expect("first start");

    // WHEN
    let second = service.ensure_running(&addr).await.expect("second call");

    // THEN
    assert!(matches!(first, LaunchOutcome::Started(_)));
    assert_eq!(second, LaunchOutcome::AlreadyRunning(first.local_addr()));
    assert_eq!(service.active_addr(), Some(first.local_addr()));
}

/// **VALUE**: Switching addresses moves the service: the new address answers
/// and the old one stops listening.
///
/// **BUG THIS CATCHES**: Would catch a leaked listener on the old port after a
/// settings change.
#[tokio::test]
async fn given_running_service_when_new_addr_requested_then_old_addr_closes() {
    // GIVEN: A service at A
    let addr_a = format!("127.0.0.1:{}", free_port());
    let addr_b = format!("127.0.0.1:{}", free_port());
    let mut service = FileService::new(TEST_SETTLE, test_context());
    service.ensure_running(&addr_a).await.expect("start at A");

    // WHEN: Asking for B
    let outcome = service.ensure_running(&addr_b).await.expect("start at B");

    // THEN: B answers, A is gone
    assert!(matches!(outcome, LaunchOutcome::Replaced { ref previous, .. } if *previous == addr_a));
    let answer = http_client()
        .get(format!("http://{addr_b}/isfile/?path=/definitely/not/here"))
        .send()
        .await
        .expect("B answers")
        .text()
        .await
        .expect("body");
    assert_eq!(answer, "no");
    assert!(wait_until_closed(&addr_a).await, "A must stop listening");
}

/// **VALUE**: A port already taken is reported as a bind error and leaves no
/// instance behind.
#[tokio::test]
async fn given_occupied_port_when_start_requested_then_bind_error() {
    // GIVEN: Someone else holds the port
    let blocker = StdTcpListener::bind("127.0.0.1:0").expect("bind blocker");
    let addr = blocker.local_addr().expect("addr").to_string();
    let mut service = FileService::new(TEST_SETTLE, test_context());

    // WHEN
    let result = service.ensure_running(&addr).await;

    // THEN
    match result {
        Err(e @ ServerError::Bind { .. }) => assert!(!e.reason().is_empty()),
        other => panic!("expected Bind error, got {other:?}"),
    }
    assert!(service.active_addr().is_none());
}
