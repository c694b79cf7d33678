use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

/// Error taxonomy for the upload coordinator.
///
/// Variants map one-to-one onto the caller-visible failure modes:
///
/// - `Validation`: rejected before any backend call, no side effects
/// - `SessionNotFound`: unknown or already-terminal session
/// - `IncompleteUpload`: completion attempted with zero recorded parts
/// - `Backend`: the storage port call failed; local state is left unchanged
///   on chunk/create failures so the operation is retryable
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("upload session not found: {0}")]
    SessionNotFound(String),
    #[error("upload has no recorded parts: {0}")]
    IncompleteUpload(String),
    #[error("storage backend error: {0}")]
    Backend(#[from] StorageError),
}

pub type UploadResult<T> = Result<T, UploadError>;

impl UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::Validation(_) => StatusCode::BAD_REQUEST,
            UploadError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            UploadError::IncompleteUpload(_) => StatusCode::CONFLICT,
            UploadError::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            UploadError::Validation(_) => "validation_error",
            UploadError::SessionNotFound(_) => "session_not_found",
            UploadError::IncompleteUpload(_) => "incomplete_upload",
            UploadError::Backend(_) => "backend_error",
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
