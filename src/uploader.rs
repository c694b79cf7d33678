//! # Chunk Uploader
//!
//! Accepts one chunk at a time for a session, forwards it to the storage
//! port, and records the resulting part metadata under the session's lock.
//!
//! The backend call runs outside any lock. Because a cancellation may land
//! while a part upload is in flight, the recording step re-resolves the
//! session and re-checks its status under the lock before mutating; a
//! result arriving after cancellation is discarded rather than
//! resurrecting the session.

use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::{UploadError, UploadResult};
use crate::middleware::ValidationMiddleware;
use crate::storage::StoragePort;
use crate::store::SessionStore;

pub struct ChunkUploader {
    store: Arc<SessionStore>,
    port: Arc<dyn StoragePort>,
}

impl ChunkUploader {
    pub fn new(store: Arc<SessionStore>, port: Arc<dyn StoragePort>) -> Self {
        Self { store, port }
    }

    /// Uploads one chunk and records its part metadata.
    ///
    /// Re-uploading the same part number is a safe idempotent retry: the
    /// backend overwrites the remote part and the recorded byte length
    /// replaces the previous one. A backend failure mutates nothing.
    pub async fn upload_chunk(
        &self,
        session_id: &str,
        part_number: u16,
        bytes: Bytes,
    ) -> UploadResult<String> {
        ValidationMiddleware::validate_part_number(part_number)?;
        ValidationMiddleware::validate_chunk_body(bytes.len())?;

        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| UploadError::SessionNotFound(session_id.to_string()))?;

        let (storage_key, backend_upload_id) = {
            let session = handle.lock().await;
            if !session.status.accepts_parts() {
                return Err(UploadError::SessionNotFound(session_id.to_string()));
            }
            (
                session.storage_key.clone(),
                session.backend_upload_id.clone(),
            )
        };

        let chunk_len = bytes.len() as u64;
        let etag = self
            .port
            .upload_part(&storage_key, &backend_upload_id, part_number, bytes)
            .await?;

        // Re-resolve the session: it may have been cancelled or moved into
        // completion while the backend call was in flight.
        let Some(handle) = self.store.get(session_id).await else {
            warn!(
                session_id = %session_id,
                part_number,
                "session gone after part upload; discarding result"
            );
            return Err(UploadError::SessionNotFound(session_id.to_string()));
        };

        let mut session = handle.lock().await;
        if !session.status.accepts_parts() {
            warn!(
                session_id = %session_id,
                part_number,
                status = ?session.status,
                "session no longer accepting parts; discarding result"
            );
            return Err(UploadError::SessionNotFound(session_id.to_string()));
        }
        session.record_part(part_number, etag.clone(), chunk_len);
        debug!(
            session_id = %session_id,
            part_number,
            bytes = chunk_len,
            uploaded = session.uploaded_size,
            "part recorded"
        );

        Ok(etag)
    }
}
