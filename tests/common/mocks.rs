use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use stowage::{CompletedPartSpec, StorageError, StoragePort, StorageResult};

/// Record of one completion call observed by the mock backend.
#[derive(Clone, Debug)]
pub struct CompletionCall {
    pub key: String,
    pub backend_upload_id: String,
    pub parts: Vec<CompletedPartSpec>,
}

#[derive(Default)]
struct MockState {
    created: Vec<(String, String)>,
    parts: HashMap<String, Vec<(u16, usize)>>,
    completions: Vec<CompletionCall>,
    aborts: Vec<(String, String)>,
}

/// In-memory storage port with failure injection and optional latency,
/// for exercising the coordinator without a real backend.
#[derive(Default)]
pub struct MockStoragePort {
    state: Mutex<MockState>,
    next_upload_id: AtomicU64,
    fail_create: AtomicBool,
    fail_upload_part: AtomicBool,
    fail_complete: AtomicBool,
    fail_abort: AtomicBool,
    part_delay: Mutex<Option<Duration>>,
}

impl MockStoragePort {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_upload_part(&self, fail: bool) {
        self.fail_upload_part.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_complete(&self, fail: bool) {
        self.fail_complete.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_abort(&self, fail: bool) {
        self.fail_abort.store(fail, Ordering::SeqCst);
    }

    /// Delays every subsequent part upload, for in-flight race tests.
    pub fn set_part_delay(&self, delay: Duration) {
        *self.part_delay.lock().unwrap() = Some(delay);
    }

    pub fn created_count(&self) -> usize {
        self.state.lock().unwrap().created.len()
    }

    pub fn completions(&self) -> Vec<CompletionCall> {
        self.state.lock().unwrap().completions.clone()
    }

    pub fn aborts(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().aborts.clone()
    }

    pub fn uploaded_parts(&self, backend_upload_id: &str) -> Vec<(u16, usize)> {
        self.state
            .lock()
            .unwrap()
            .parts
            .get(backend_upload_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl StoragePort for MockStoragePort {
    async fn create_multipart_upload(
        &self,
        key: &str,
        _content_type: &str,
    ) -> StorageResult<String> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StorageError::Create {
                key: key.to_string(),
                reason: "injected create failure".into(),
            });
        }
        let id = format!(
            "mock-upload-{}",
            self.next_upload_id.fetch_add(1, Ordering::SeqCst)
        );
        let mut state = self.state.lock().unwrap();
        state.created.push((key.to_string(), id.clone()));
        Ok(id)
    }

    async fn upload_part(
        &self,
        key: &str,
        backend_upload_id: &str,
        part_number: u16,
        body: Bytes,
    ) -> StorageResult<String> {
        let delay = *self.part_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_upload_part.load(Ordering::SeqCst) {
            return Err(StorageError::UploadPart {
                key: key.to_string(),
                part_number,
                reason: "injected part failure".into(),
            });
        }
        let mut state = self.state.lock().unwrap();
        state
            .parts
            .entry(backend_upload_id.to_string())
            .or_default()
            .push((part_number, body.len()));
        Ok(format!("etag-{}-{}", part_number, body.len()))
    }

    async fn complete_multipart_upload(
        &self,
        key: &str,
        backend_upload_id: &str,
        parts: &[CompletedPartSpec],
    ) -> StorageResult<String> {
        if self.fail_complete.load(Ordering::SeqCst) {
            return Err(StorageError::Complete {
                key: key.to_string(),
                reason: "injected completion failure".into(),
            });
        }
        let mut state = self.state.lock().unwrap();
        state.completions.push(CompletionCall {
            key: key.to_string(),
            backend_upload_id: backend_upload_id.to_string(),
            parts: parts.to_vec(),
        });
        Ok(format!("https://storage.example/{}", key))
    }

    async fn abort_multipart_upload(
        &self,
        key: &str,
        backend_upload_id: &str,
    ) -> StorageResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .aborts
            .push((key.to_string(), backend_upload_id.to_string()));
        drop(state);
        if self.fail_abort.load(Ordering::SeqCst) {
            return Err(StorageError::Abort {
                key: key.to_string(),
                reason: "injected abort failure".into(),
            });
        }
        Ok(())
    }
}
