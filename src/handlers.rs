//! # HTTP Handlers
//!
//! Axum handlers binding the coordinator's logical operations to the
//! HTTP/JSON transport. Handlers stay thin: they deserialize, delegate to
//! the session manager / chunk uploader / progress tracker, and serialize.
//! All failure mapping lives in `UploadError::into_response`.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::errors::UploadResult;
use crate::models::StartUpload;
use crate::progress::ProgressReport;
use crate::router::AppState;

/// `POST /v1/uploads/init` — start a new upload session.
pub async fn handle_initiate(
    State(state): State<AppState>,
    Json(request): Json<StartUpload>,
) -> UploadResult<Json<Value>> {
    let started = state.manager.start(request).await?;
    Ok(Json(json!({
        "message": "Multipart upload initiated",
        "sessionId": started.session_id,
        "storageKey": started.storage_key,
    })))
}

/// `PUT /v1/uploads/{id}/parts/{n}` — upload one chunk.
pub async fn handle_upload_chunk(
    State(state): State<AppState>,
    Path((session_id, part_number)): Path<(String, u16)>,
    body: Bytes,
) -> UploadResult<Json<Value>> {
    let etag = state
        .uploader
        .upload_chunk(&session_id, part_number, body)
        .await?;
    Ok(Json(json!({
        "message": "Chunk uploaded successfully",
        "sessionId": session_id,
        "partNumber": part_number,
        "etag": etag,
    })))
}

/// `POST /v1/uploads/{id}/complete` — stitch the parts into one object.
pub async fn handle_complete(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> UploadResult<Json<Value>> {
    let object_url = state.manager.complete(&session_id).await?;
    Ok(Json(json!({
        "message": "Multipart upload completed",
        "sessionId": session_id,
        "objectUrl": object_url,
    })))
}

/// `DELETE /v1/uploads/{id}` — cancel the upload and abort backend parts.
pub async fn handle_cancel(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> UploadResult<Json<Value>> {
    state.manager.cancel(&session_id).await?;
    Ok(Json(json!({
        "message": "Upload cancelled",
        "sessionId": session_id,
    })))
}

/// `GET /v1/uploads/{id}/progress` — percentage complete.
pub async fn handle_progress(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> UploadResult<Json<Value>> {
    let percent = state.tracker.percent(&session_id).await?;
    Ok(Json(json!({
        "sessionId": session_id,
        "percent": percent,
    })))
}

/// `GET /v1/uploads/{id}` — detailed session status.
pub async fn handle_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> UploadResult<Json<ProgressReport>> {
    let report = state.tracker.report(&session_id).await?;
    Ok(Json(report))
}

/// `GET /health` — liveness probe.
pub async fn handle_health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
