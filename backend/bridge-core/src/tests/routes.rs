use crate::file_manager::Unsupported;
use crate::file_service::handlers::static_files::local_path;
use crate::file_service::{MAX_HEADER_BYTES, RouteContext, build_router};

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::connect_info::MockConnectInfo;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use tempfile::tempdir;
use tower::ServiceExt;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn router_from(peer: &str) -> Router {
    let context = RouteContext::new(
        Arc::new(Unsupported {
            platform: "test".to_string(),
        }),
        reqwest::Client::new(),
    );
    let peer: SocketAddr = peer.parse().expect("valid peer address");
    build_router(context).layer(MockConnectInfo(peer))
}

fn router() -> Router {
    router_from("127.0.0.1:50000")
}

fn form(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn post_form(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(Body::from(form(pairs)))
        .expect("valid request")
}

/// Plain text parts, the way a browser posts a `FormData` object.
fn post_multipart(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    let boundary = "XBOUNDARYX";
    let mut body = String::new();
    for (name, value) in pairs {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    Request::post(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("valid request")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

/// **VALUE**: `/isfile/` answers `yes` for files and `no` for everything else,
/// over both GET query strings and POST forms.
///
/// **BUG THIS CATCHES**: Would catch the GET route ignoring the query string.
#[tokio::test]
async fn given_file_and_directory_when_isfile_requested_then_yes_and_no() {
    // GIVEN
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("f.txt");
    fs::write(&file, "x").expect("write");

    // WHEN: GET for the file, POST for the directory
    let get = Request::get(format!("/isfile/?{}", form(&[("path", path_str(&file))])))
        .body(Body::empty())
        .expect("valid request");
    let file_answer = router().oneshot(get).await.expect("response");
    let dir_answer = router()
        .oneshot(post_form("/isfile/", &[("path", path_str(dir.path()))]))
        .await
        .expect("response");

    // THEN
    assert_eq!(body_text(file_answer).await, "yes");
    assert_eq!(body_text(dir_answer).await, "no");
}

/// **VALUE**: Requests from other hosts are refused.
///
/// **WHY THIS MATTERS**: The routes read, write and delete arbitrary paths; a
/// listener bound to `0.0.0.0` by mistake must still refuse remote peers.
///
/// **BUG THIS CATCHES**: Would catch the loopback guard being dropped from the
/// layer stack.
#[tokio::test]
async fn given_remote_peer_when_any_route_requested_then_forbidden() {
    let response = router_from("192.168.1.20:40000")
        .oneshot(post_form("/isfile/", &[("path", "/etc/hosts")]))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// **VALUE**: Oversized request headers are rejected with 431.
#[tokio::test]
async fn given_huge_header_when_requested_then_header_fields_too_large() {
    let request = Request::get("/isfile/?path=x")
        .header("x-padding", "a".repeat(MAX_HEADER_BYTES + 1))
        .body(Body::empty())
        .expect("valid request");

    let response = router().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE);
}

/// **VALUE**: `/savefile` writes the text and creates missing directories.
#[tokio::test]
async fn given_nested_filename_when_savefile_posted_then_text_written() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("deep").join("note.html");

    let response = router()
        .oneshot(post_form(
            "/savefile",
            &[("filename", path_str(&target)), ("content", "<p>hi</p>")],
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fs::read_to_string(&target).expect("read"), "<p>hi</p>");
}

/// **VALUE**: `/savefile` whose parent path is a regular file fails with the
/// error text.
///
/// **BUG THIS CATCHES**: Would catch answering `ok` when the parent directory
/// could not be created.
#[tokio::test]
async fn given_file_as_parent_when_savefile_posted_then_error_text() {
    // GIVEN: "blocker" is a file, so blocker/note.html cannot be created
    let dir = tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").expect("write");
    let target = blocker.join("note.html");

    // WHEN
    let response = router()
        .oneshot(post_form(
            "/savefile",
            &[("filename", path_str(&target)), ("content", "<p>hi</p>")],
        ))
        .await
        .expect("response");

    // THEN
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body_text(response).await.is_empty());
    assert_eq!(fs::read_to_string(&blocker).expect("read"), "x");
}

/// **VALUE**: `/savefile` accepts the text as a `FormData` body.
#[tokio::test]
async fn given_multipart_body_when_savefile_posted_then_text_written() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("note.html");

    let response = router()
        .oneshot(post_multipart(
            "/savefile",
            &[("filename", path_str(&target)), ("content", "<p>hi</p>")],
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fs::read_to_string(&target).expect("read"), "<p>hi</p>");
}

/// **VALUE**: `/savebinfile` stores the uploaded bytes at the named path.
#[tokio::test]
async fn given_multipart_upload_when_savebinfile_posted_then_bytes_written() {
    // GIVEN: A multipart body with filename and file parts
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("bin").join("blob.dat");
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"filename\"\r\n\r\n\
         {}\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"blob\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         \x01\x02\x03\r\n\
         --{boundary}--\r\n",
        path_str(&target)
    );
    let request = Request::post("/savebinfile")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("valid request");

    // WHEN
    let response = router().oneshot(request).await.expect("response");

    // THEN
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fs::read(&target).expect("read"), vec![1, 2, 3]);
}

/// **VALUE**: An upload without a `file` part is a client error.
#[tokio::test]
async fn given_upload_without_file_part_when_savebinfile_posted_then_bad_request() {
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"filename\"\r\n\r\n\
         /tmp/never\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::post("/savebinfile")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("valid request");

    let response = router().oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// **VALUE**: `/fs/move` with a missing source reports the failure and leaves
/// the destination alone.
///
/// **WHY THIS MATTERS**: The extension shows the body text to the user and
/// must not lose the item it tried to overwrite.
#[tokio::test]
async fn given_missing_src_when_move_posted_then_error_text_and_dest_intact() {
    // GIVEN
    let dir = tempdir().expect("tempdir");
    let dest = dir.path().join("dest.txt");
    fs::write(&dest, "keep").expect("write");
    let missing = dir.path().join("missing");

    // WHEN
    let response = router()
        .oneshot(post_form(
            "/fs/move",
            &[("src", path_str(&missing)), ("dest", path_str(&dest))],
        ))
        .await
        .expect("response");

    // THEN
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("missing"));
    assert_eq!(fs::read_to_string(&dest).expect("read"), "keep");
}

/// **VALUE**: `/fs/copy` answers `ok` and produces the copy.
#[tokio::test]
async fn given_existing_file_when_copy_posted_then_ok() {
    let dir = tempdir().expect("tempdir");
    let src = dir.path().join("a.txt");
    let dest = dir.path().join("copies").join("b.txt");
    fs::write(&src, "content").expect("write");

    let response = router()
        .oneshot(post_form(
            "/fs/copy",
            &[("src", path_str(&src)), ("dest", path_str(&dest))],
        ))
        .await
        .expect("response");

    assert_eq!(body_text(response).await, "ok");
    assert_eq!(fs::read_to_string(&dest).expect("read"), "content");
}

/// **VALUE**: `/fs/copy` reads `src` and `dest` from a multipart body.
///
/// **WHY THIS MATTERS**: The extension posts `FormData`, which browsers send
/// as multipart/form-data.
///
/// **BUG THIS CATCHES**: Would catch a urlencoded-only extractor answering
/// 415 to every real copy request.
#[tokio::test]
async fn given_multipart_body_when_copy_posted_then_ok_and_copied() {
    // GIVEN
    let dir = tempdir().expect("tempdir");
    let src = dir.path().join("a.txt");
    let dest = dir.path().join("b.txt");
    fs::write(&src, "content").expect("write");

    // WHEN
    let response = router()
        .oneshot(post_multipart(
            "/fs/copy",
            &[("src", path_str(&src)), ("dest", path_str(&dest))],
        ))
        .await
        .expect("response");

    // THEN
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
    assert_eq!(fs::read_to_string(&dest).expect("read"), "content");
    assert!(src.exists());
}

/// **VALUE**: `/fs/move` reads `src` and `dest` from a multipart body.
#[tokio::test]
async fn given_multipart_body_when_move_posted_then_ok_and_moved() {
    // GIVEN
    let dir = tempdir().expect("tempdir");
    let src = dir.path().join("tree");
    let dest = dir.path().join("moved");
    fs::create_dir_all(&src).expect("mkdir");
    fs::write(src.join("a.txt"), "a").expect("write");

    // WHEN
    let response = router()
        .oneshot(post_multipart(
            "/fs/move",
            &[("src", path_str(&src)), ("dest", path_str(&dest))],
        ))
        .await
        .expect("response");

    // THEN
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
    assert_eq!(fs::read_to_string(dest.join("a.txt")).expect("read"), "a");
    assert!(!src.exists());
}

/// **VALUE**: `/deletedir/` removes a directory tree.
#[tokio::test]
async fn given_directory_when_deletedir_posted_then_removed() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("tree");
    fs::create_dir_all(target.join("sub")).expect("mkdir");

    let response = router()
        .oneshot(post_form("/deletedir/", &[("path", path_str(&target))]))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!target.exists());
}

/// **VALUE**: The file manager route surfaces launcher errors as text.
#[tokio::test]
async fn given_unsupported_platform_when_filemanager_posted_then_error_text() {
    let response = router()
        .oneshot(post_form("/filemanager/", &[("path", "/tmp")]))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("test"));
}

/// **VALUE**: `/download` always allows cross-origin callers, and an empty URL
/// only prepares the destination directory.
///
/// **BUG THIS CATCHES**: Would catch the CORS header being set only on success.
#[tokio::test]
async fn given_empty_url_when_download_posted_then_parent_created_and_cors_header_set() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("downloads").join("file.png");

    let response = router()
        .oneshot(post_form(
            "/download",
            &[("url", ""), ("filename", path_str(&target))],
        ))
        .await
        .expect("response");

    assert_eq!(
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert!(dir.path().join("downloads").is_dir());
    assert_eq!(body_text(response).await, "");
}

/// **VALUE**: An inline image is saved through the route and its path echoed.
#[tokio::test]
async fn given_data_uri_when_download_posted_then_saved_path_returned() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("pic.png");

    let response = router()
        .oneshot(post_form(
            "/download",
            &[
                ("url", "data:image/png;base64,aGk="),
                ("filename", path_str(&target)),
            ],
        ))
        .await
        .expect("response");

    assert_eq!(body_text(response).await, path_str(&target));
    assert_eq!(fs::read(&target).expect("read"), b"hi");
}

/// **VALUE**: The static route serves files by absolute path and 404s on
/// missing ones.
#[cfg(unix)]
#[tokio::test]
async fn given_local_file_when_file_service_requested_then_bytes_served() {
    // GIVEN
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("page.html");
    fs::write(&file, "<html></html>").expect("write");

    // WHEN
    let found = router()
        .oneshot(
            Request::get(format!("/file-service{}", path_str(&file)))
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("response");
    let missing = router()
        .oneshot(
            Request::get(format!("/file-service{}/nope.html", path_str(dir.path())))
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("response");

    // THEN
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(body_text(found).await, "<html></html>");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

/// **VALUE**: The captured route path regains its leading slash on unix.
#[test]
fn given_captured_path_when_localized_then_absolute_on_unix() {
    if cfg!(windows) {
        assert_eq!(local_path("C:/data/a.txt"), "C:/data/a.txt");
    } else {
        assert_eq!(local_path("home/u/a.txt"), "/home/u/a.txt");
    }
}
