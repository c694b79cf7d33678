//! # Progress Tracker
//!
//! Read-only consumer of the session store that derives per-session
//! progress from accumulated uploaded bytes versus the declared total
//! size. Reads take only the per-session lock for a consistent snapshot
//! and never block other sessions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::errors::{UploadError, UploadResult};
use crate::models::UploadStatus;
use crate::store::SessionStore;

/// Detailed point-in-time view of one session.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub session_id: String,
    pub file_name: String,
    pub storage_key: String,
    pub total_size: u64,
    pub uploaded_size: u64,
    pub parts_recorded: usize,
    pub status: UploadStatus,
    pub percent: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct ProgressTracker {
    store: Arc<SessionStore>,
}

impl ProgressTracker {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Percentage complete, floored and clamped to 0..=100. A session with
    /// no recorded parts reports 0.
    pub async fn percent(&self, session_id: &str) -> UploadResult<u8> {
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| UploadError::SessionNotFound(session_id.to_string()))?;
        let session = handle.lock().await;
        Ok(session.progress_percent())
    }

    /// Full snapshot of the session's progress and lifecycle state.
    pub async fn report(&self, session_id: &str) -> UploadResult<ProgressReport> {
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| UploadError::SessionNotFound(session_id.to_string()))?;
        let session = handle.lock().await;
        Ok(ProgressReport {
            session_id: session.session_id.clone(),
            file_name: session.file_name.clone(),
            storage_key: session.storage_key.clone(),
            total_size: session.total_size,
            uploaded_size: session.uploaded_size,
            parts_recorded: session.parts.len(),
            status: session.status,
            percent: session.progress_percent(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        })
    }
}
