//! Timeout-bounding decorator over a storage port.

use async_trait::async_trait;
use bytes::Bytes;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::{CompletedPartSpec, StorageError, StoragePort, StorageResult};

/// Wraps another storage port and bounds every call with its own deadline,
/// so one hung backend operation cannot block its caller indefinitely.
/// Each call gets an independent timer; a timed-out call surfaces as a
/// `StorageError::Timeout` and is retryable like any other backend
/// failure.
pub struct TimeoutStoragePort {
    inner: Arc<dyn StoragePort>,
    timeout: Duration,
}

impl TimeoutStoragePort {
    pub fn new(inner: Arc<dyn StoragePort>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T, F>(
        &self,
        operation: &'static str,
        key: &str,
        call: F,
    ) -> StorageResult<T>
    where
        F: Future<Output = StorageResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout {
                key: key.to_string(),
                operation,
                timeout: self.timeout,
            }),
        }
    }
}

#[async_trait]
impl StoragePort for TimeoutStoragePort {
    async fn create_multipart_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        self.bounded(
            "create",
            key,
            self.inner.create_multipart_upload(key, content_type),
        )
        .await
    }

    async fn upload_part(
        &self,
        key: &str,
        backend_upload_id: &str,
        part_number: u16,
        body: Bytes,
    ) -> StorageResult<String> {
        self.bounded(
            "upload-part",
            key,
            self.inner
                .upload_part(key, backend_upload_id, part_number, body),
        )
        .await
    }

    async fn complete_multipart_upload(
        &self,
        key: &str,
        backend_upload_id: &str,
        parts: &[CompletedPartSpec],
    ) -> StorageResult<String> {
        self.bounded(
            "complete",
            key,
            self.inner
                .complete_multipart_upload(key, backend_upload_id, parts),
        )
        .await
    }

    async fn abort_multipart_upload(
        &self,
        key: &str,
        backend_upload_id: &str,
    ) -> StorageResult<()> {
        self.bounded(
            "abort",
            key,
            self.inner.abort_multipart_upload(key, backend_upload_id),
        )
        .await
    }
}
