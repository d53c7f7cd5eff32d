use crate::support::{TEST_SETTLE, free_port, http_client, test_context};

use bridge_core::file_service::FileService;

use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: `/download` fetches a remote resource into the named file and
/// echoes the saved path.
///
/// **WHY THIS MATTERS**: Every captured page pulls its images through this
/// route.
///
/// **BUG THIS CATCHES**: Would catch streaming into the wrong path or dropping
/// the last chunk.
#[tokio::test]
async fn given_remote_resource_when_download_posted_then_bytes_saved() {
    // GIVEN: A mock origin and a running service
    let origin = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 4096]))
        .mount(&origin)
        .await;

    let addr = format!("127.0.0.1:{}", free_port());
    let mut service = FileService::new(TEST_SETTLE, test_context());
    service.ensure_running(&addr).await.expect("service starts");

    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("images").join("img.png");
    let target_str = target.to_str().expect("utf-8 path");

    // WHEN
    let response = http_client()
        .post(format!("http://{addr}/download"))
        .form(&[
            ("url", format!("{}/img.png", origin.uri())),
            ("filename", target_str.to_string()),
        ])
        .send()
        .await
        .expect("route answers");

    // THEN
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(response.text().await.expect("body"), target_str);
    assert_eq!(std::fs::read(&target).expect("read"), vec![7u8; 4096]);
}

/// **VALUE**: An error status from the origin is a failed download, not an
/// error page saved to disk.
#[tokio::test]
async fn given_origin_404_when_download_posted_then_server_error_and_no_file() {
    let origin = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&origin)
        .await;

    let addr = format!("127.0.0.1:{}", free_port());
    let mut service = FileService::new(TEST_SETTLE, test_context());
    service.ensure_running(&addr).await.expect("service starts");

    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("missing.png");

    let response = http_client()
        .post(format!("http://{addr}/download"))
        .form(&[
            ("url", format!("{}/gone.png", origin.uri())),
            ("filename", target.to_str().expect("utf-8 path").to_string()),
        ])
        .send()
        .await
        .expect("route answers");

    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!target.exists());
}
