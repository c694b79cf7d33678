use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::storage::CompletedPartSpec;

/// Lifecycle state of an upload session.
///
/// `Created` exists only for the instant between constructing the session
/// record and the successful backend create call; it is never observable
/// through the public API.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UploadStatus {
    Created,
    Active,
    Completing,
    Completed,
    Failed,
    Aborted,
}

impl UploadStatus {
    /// Whether chunk uploads may still be recorded in this state.
    ///
    /// Chunks are rejected once completion has started so the parts
    /// snapshot handed to the backend stays stable.
    pub fn accepts_parts(self) -> bool {
        matches!(self, UploadStatus::Active)
    }

    /// Whether completion may be attempted (or retried) from this state.
    pub fn completable(self) -> bool {
        matches!(
            self,
            UploadStatus::Active | UploadStatus::Completing | UploadStatus::Failed
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Aborted)
    }
}

/// Metadata recorded for one uploaded part.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PartRecord {
    /// Opaque integrity token returned by the backend, echoed verbatim
    /// at completion.
    pub etag: String,
    /// Byte length of the part body as received.
    pub size: u64,
}

/// Server-side record tracking one logical file's in-progress multipart
/// upload.
///
/// The parts map is keyed by part number; `BTreeMap` iteration yields the
/// ascending order the backend completion call requires.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UploadSession {
    pub session_id: String,
    pub user_id: String,
    pub file_name: String,
    /// Destination path, derived once from username and sanitized filename.
    pub storage_key: String,
    /// Identifier returned by the backend's multipart create call.
    pub backend_upload_id: String,
    pub content_type: String,
    /// Declared byte length; informational, used only for the percentage.
    pub total_size: u64,
    /// Running sum of recorded part sizes. Recomputed on every record so a
    /// part overwrite replaces, never adds to, the total.
    pub uploaded_size: u64,
    pub parts: BTreeMap<u16, PartRecord>,
    pub status: UploadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UploadSession {
    pub fn new(
        session_id: String,
        user_id: String,
        file_name: String,
        storage_key: String,
        backend_upload_id: String,
        content_type: String,
        total_size: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            user_id,
            file_name,
            storage_key,
            backend_upload_id,
            content_type,
            total_size,
            uploaded_size: 0,
            parts: BTreeMap::new(),
            status: UploadStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records (or overwrites) one uploaded part and recomputes the running
    /// byte total from the map, so an idempotent retry of the same part
    /// number never double-counts.
    pub fn record_part(&mut self, part_number: u16, etag: String, size: u64) {
        self.parts.insert(part_number, PartRecord { etag, size });
        self.uploaded_size = self.parts.values().map(|p| p.size).sum();
        self.touch();
    }

    /// Parts list for the backend completion call, ascending by part number.
    pub fn completed_parts(&self) -> Vec<CompletedPartSpec> {
        self.parts
            .iter()
            .map(|(part_number, record)| CompletedPartSpec {
                part_number: *part_number,
                etag: record.etag.clone(),
            })
            .collect()
    }

    /// Percentage of the declared size covered by recorded parts, floored
    /// and clamped to 0..=100.
    pub fn progress_percent(&self) -> u8 {
        if self.total_size == 0 {
            return 0;
        }
        let percent = self.uploaded_size.saturating_mul(100) / self.total_size;
        percent.min(100) as u8
    }

    /// Time since the last recorded activity, for idle reclamation.
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now - self.updated_at
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Parameters for starting a new upload session.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StartUpload {
    pub username: String,
    pub file_name: String,
    pub total_size: u64,
    pub content_type: String,
}

/// Result of a successful start operation.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StartedUpload {
    pub session_id: String,
    pub storage_key: String,
}
