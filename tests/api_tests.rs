//! HTTP round-trip tests for the upload API, driving the axum router
//! directly with `tower::ServiceExt::oneshot` over the mock backend.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::TestCoordinator;
use stowage::{build_router, AppState};

fn router(coord: &TestCoordinator) -> axum::Router {
    build_router(AppState {
        manager: coord.manager.clone(),
        uploader: coord.uploader.clone(),
        tracker: coord.tracker.clone(),
    })
}

async fn send(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("Content-Type", ct);
    }
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_json(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    send(
        router,
        method,
        uri,
        Body::from(serde_json::to_vec(&body).unwrap()),
        Some("application/json"),
    )
    .await
}

fn init_body(username: &str, file_name: &str, total_size: u64) -> Value {
    json!({
        "username": username,
        "fileName": file_name,
        "totalSize": total_size,
        "contentType": "image/jpeg",
    })
}

#[tokio::test]
async fn health_check_responds_ok() {
    let coord = TestCoordinator::new();
    let app = router(&coord);
    let (status, body) = send(&app, "GET", "/health", Body::empty(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn full_upload_round_trip() {
    let coord = TestCoordinator::new();
    let app = router(&coord);

    let (status, body) =
        send_json(&app, "POST", "/v1/uploads/init", init_body("alice", "photo.jpg", 10)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storageKey"], "alice/photo.jpg");
    let session_id = body["sessionId"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/v1/uploads/{session_id}/parts/1"),
        Body::from(vec![1u8; 5]),
        Some("application/octet-stream"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["partNumber"], 1);
    assert!(body["etag"].as_str().is_some());

    let (status, body) = send(
        &app,
        "GET",
        &format!("/v1/uploads/{session_id}/progress"),
        Body::empty(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["percent"], 50);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/v1/uploads/{session_id}/parts/2"),
        Body::from(vec![2u8; 5]),
        Some("application/octet-stream"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/v1/uploads/{session_id}"),
        Body::empty(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uploadedSize"], 10);
    assert_eq!(body["partsRecorded"], 2);
    assert_eq!(body["status"], "active");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/uploads/{session_id}/complete"),
        Body::empty(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["objectUrl"]
        .as_str()
        .unwrap()
        .ends_with("alice/photo.jpg"));

    // The session is gone afterwards.
    let (status, _) = send(
        &app,
        "GET",
        &format!("/v1/uploads/{session_id}/progress"),
        Body::empty(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn init_rejects_invalid_parameters() {
    let coord = TestCoordinator::new();
    let app = router(&coord);

    let (status, body) =
        send_json(&app, "POST", "/v1/uploads/init", init_body("", "photo.jpg", 10)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) =
        send_json(&app, "POST", "/v1/uploads/init", init_body("alice", "photo.jpg", 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chunk_for_unknown_session_is_404() {
    let coord = TestCoordinator::new();
    let app = router(&coord);

    let (status, body) = send(
        &app,
        "PUT",
        "/v1/uploads/unknown-id/parts/1",
        Body::from(vec![0u8; 4]),
        Some("application/octet-stream"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");
}

#[tokio::test]
async fn completing_without_parts_is_409() {
    let coord = TestCoordinator::new();
    let app = router(&coord);

    let init = init_body("bob", "video.mp4", 20_000_000);
    let (_, body) = send_json(&app, "POST", "/v1/uploads/init", init).await;
    let session_id = body["sessionId"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/uploads/{session_id}/complete"),
        Body::empty(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "incomplete_upload");
}

#[tokio::test]
async fn cancel_then_everything_is_404() {
    let coord = TestCoordinator::new();
    let app = router(&coord);

    let init = init_body("bob", "video.mp4", 20_000_000);
    let (_, body) = send_json(&app, "POST", "/v1/uploads/init", init).await;
    let session_id = body["sessionId"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/v1/uploads/{session_id}/parts/1"),
        Body::from(vec![0u8; 8]),
        Some("application/octet-stream"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/v1/uploads/{session_id}"),
        Body::empty(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(coord.port.aborts().len(), 1);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/v1/uploads/{session_id}/progress"),
        Body::empty(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/v1/uploads/{session_id}"),
        Body::empty(),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn backend_failure_maps_to_bad_gateway() {
    let coord = TestCoordinator::new();
    let app = router(&coord);
    coord.port.set_fail_create(true);

    let (status, body) =
        send_json(&app, "POST", "/v1/uploads/init", init_body("alice", "photo.jpg", 10)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "backend_error");
}
