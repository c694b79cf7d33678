//! # Request Routing
//!
//! Builds the axum router for the upload API and carries the shared
//! application state. Upload routes follow the coordinator's logical
//! operations one-to-one:
//!
//! - `POST   /v1/uploads/init`            start a session
//! - `PUT    /v1/uploads/{id}/parts/{n}`  upload one chunk
//! - `POST   /v1/uploads/{id}/complete`   finalize
//! - `DELETE /v1/uploads/{id}`            cancel
//! - `GET    /v1/uploads/{id}/progress`   percentage complete
//! - `GET    /v1/uploads/{id}`            detailed status
//! - `GET    /health`                     liveness probe

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::constants::MAX_CHUNK_BODY_BYTES;
use crate::handlers::*;
use crate::manager::SessionManager;
use crate::progress::ProgressTracker;
use crate::uploader::ChunkUploader;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<SessionManager>,
    pub uploader: Arc<ChunkUploader>,
    pub tracker: Arc<ProgressTracker>,
}

/// Builds the service router with CORS and a chunk-sized body limit.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/v1/uploads/init", post(handle_initiate))
        .route("/v1/uploads/{id}/parts/{n}", put(handle_upload_chunk))
        .route("/v1/uploads/{id}/complete", post(handle_complete))
        .route("/v1/uploads/{id}/progress", get(handle_progress))
        .route("/v1/uploads/{id}", get(handle_status).delete(handle_cancel))
        .layer(DefaultBodyLimit::max(MAX_CHUNK_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}
