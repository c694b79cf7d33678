//! # Backend Storage Port
//!
//! Trait boundary between the coordinator and the object-storage backend.
//! The port exposes exactly the minimal S3-style multipart primitive:
//! create, upload-part, complete, abort. The coordinator treats the backend
//! as a stateless remote capability; retrying `upload_part` for the same
//! part number simply overwrites the remote part.

mod s3;
mod timeout;

pub use s3::S3StoragePort;
pub use timeout::TimeoutStoragePort;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// One entry of the completion parts list, ascending by part number when
/// handed to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedPartSpec {
    pub part_number: u16,
    /// ETag returned by the part upload, echoed verbatim.
    pub etag: String,
}

/// Failures raised by storage port implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("multipart create failed for '{key}': {reason}")]
    Create { key: String, reason: String },
    #[error("part {part_number} upload failed for '{key}': {reason}")]
    UploadPart {
        key: String,
        part_number: u16,
        reason: String,
    },
    #[error("multipart completion failed for '{key}': {reason}")]
    Complete { key: String, reason: String },
    #[error("multipart abort failed for '{key}': {reason}")]
    Abort { key: String, reason: String },
    #[error("backend response missing {field} for '{key}'")]
    MissingField { key: String, field: &'static str },
    #[error("{operation} timed out after {timeout:?} for '{key}'")]
    Timeout {
        key: String,
        operation: &'static str,
        timeout: Duration,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Minimal multipart-upload capability of an object-storage backend.
///
/// Implementations must be safe to call concurrently. The service wires
/// every port behind [`TimeoutStoragePort`], which gives each call an
/// independent deadline, so one slow part cannot stall another session's
/// bookkeeping.
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Starts a multipart upload and returns the backend upload id.
    async fn create_multipart_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Uploads one part and returns its ETag.
    async fn upload_part(
        &self,
        key: &str,
        backend_upload_id: &str,
        part_number: u16,
        body: Bytes,
    ) -> StorageResult<String>;

    /// Finalizes the upload from the given parts list (ascending part
    /// number) and returns the stored object's URL.
    async fn complete_multipart_upload(
        &self,
        key: &str,
        backend_upload_id: &str,
        parts: &[CompletedPartSpec],
    ) -> StorageResult<String>;

    /// Abandons the upload and discards any parts the backend holds.
    async fn abort_multipart_upload(&self, key: &str, backend_upload_id: &str)
        -> StorageResult<()>;
}
