//! # Session Manager
//!
//! Orchestrates upload session lifecycle transitions and is the only
//! component that calls the storage port's create/complete/abort
//! operations.
//!
//! ## Lifecycle
//!
//! ```text
//! start    -> validate, backend create, store session as Active
//! complete -> Completing, backend complete, remove session
//!             (backend failure leaves the session as Failed for retry)
//! cancel   -> remove session, best-effort backend abort
//! sweep    -> cancel sessions idle past the configured threshold
//! ```
//!
//! Status transitions happen under the per-session lock; the backend calls
//! themselves run outside any lock.

use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::{UploadError, UploadResult};
use crate::keys::{build_storage_key, generate_session_id};
use crate::middleware::ValidationMiddleware;
use crate::models::{StartUpload, StartedUpload, UploadSession, UploadStatus};
use crate::storage::StoragePort;
use crate::store::SessionStore;

pub struct SessionManager {
    store: Arc<SessionStore>,
    port: Arc<dyn StoragePort>,
    config: Arc<Config>,
}

impl SessionManager {
    pub fn new(store: Arc<SessionStore>, port: Arc<dyn StoragePort>, config: Arc<Config>) -> Self {
        Self {
            store,
            port,
            config,
        }
    }

    /// Starts a new upload session.
    ///
    /// Validation happens before the backend call, so a rejected request
    /// has no side effects. On backend failure no session is created. On
    /// success the session is stored as `Active` (the `Created` state is
    /// instantaneous and never observable).
    pub async fn start(&self, request: StartUpload) -> UploadResult<StartedUpload> {
        ValidationMiddleware::validate_start(&request, self.config.max_file_size)?;

        let storage_key = build_storage_key(&request.username, &request.file_name);
        let backend_upload_id = self
            .port
            .create_multipart_upload(&storage_key, &request.content_type)
            .await?;

        let session_id = generate_session_id();
        let mut session = UploadSession::new(
            session_id.clone(),
            request.username,
            request.file_name,
            storage_key.clone(),
            backend_upload_id,
            request.content_type,
            request.total_size,
        );
        session.status = UploadStatus::Active;
        self.store.insert(session).await;

        info!(
            session_id = %session_id,
            storage_key = %storage_key,
            "upload session started"
        );

        Ok(StartedUpload {
            session_id,
            storage_key,
        })
    }

    /// Completes an upload, stitching the recorded parts into one object.
    ///
    /// Requires at least one recorded part. The parts snapshot is taken
    /// under the session lock after transitioning to `Completing`, which
    /// also stops further chunk recording. On backend failure the session
    /// is retained as `Failed` so completion can be retried without
    /// re-uploading any chunks.
    pub async fn complete(&self, session_id: &str) -> UploadResult<String> {
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| UploadError::SessionNotFound(session_id.to_string()))?;

        let (storage_key, backend_upload_id, parts) = {
            let mut session = handle.lock().await;
            if !session.status.completable() {
                return Err(UploadError::SessionNotFound(session_id.to_string()));
            }
            if session.parts.is_empty() {
                return Err(UploadError::IncompleteUpload(session_id.to_string()));
            }
            session.status = UploadStatus::Completing;
            session.touch();
            (
                session.storage_key.clone(),
                session.backend_upload_id.clone(),
                session.completed_parts(),
            )
        };

        match self
            .port
            .complete_multipart_upload(&storage_key, &backend_upload_id, &parts)
            .await
        {
            Ok(object_url) => {
                {
                    let mut session = handle.lock().await;
                    session.status = UploadStatus::Completed;
                }
                self.store.remove(session_id).await;
                info!(
                    session_id = %session_id,
                    storage_key = %storage_key,
                    parts = parts.len(),
                    "upload completed"
                );
                Ok(object_url)
            }
            Err(err) => {
                // The session may have been cancelled while the backend
                // call was in flight; only mark Failed if it still exists.
                if let Some(handle) = self.store.get(session_id).await {
                    let mut session = handle.lock().await;
                    session.status = UploadStatus::Failed;
                    session.touch();
                }
                warn!(
                    session_id = %session_id,
                    error = %err,
                    "upload completion failed, session retained for retry"
                );
                Err(err.into())
            }
        }
    }

    /// Cancels an upload session.
    ///
    /// The session is removed from the store first, so any chunk upload
    /// still in flight observes the absence when it tries to record its
    /// result. The backend abort is best-effort: a failure is logged and
    /// never blocks the cancellation.
    pub async fn cancel(&self, session_id: &str) -> UploadResult<()> {
        let handle = self
            .store
            .remove(session_id)
            .await
            .ok_or_else(|| UploadError::SessionNotFound(session_id.to_string()))?;

        let (storage_key, backend_upload_id) = {
            let mut session = handle.lock().await;
            session.status = UploadStatus::Aborted;
            (
                session.storage_key.clone(),
                session.backend_upload_id.clone(),
            )
        };

        if let Err(err) = self
            .port
            .abort_multipart_upload(&storage_key, &backend_upload_id)
            .await
        {
            warn!(
                session_id = %session_id,
                error = %err,
                "backend abort failed during cancellation; session removed regardless"
            );
        }

        info!(session_id = %session_id, "upload session cancelled");
        Ok(())
    }

    /// Cancels every session with no activity past the configured idle
    /// threshold and returns how many were reclaimed. Keeps the backend
    /// free of unbounded orphaned-part accumulation.
    pub async fn reclaim_idle(&self) -> usize {
        let now = Utc::now();
        let idle_timeout = chrono::Duration::from_std(self.config.idle_timeout)
            .unwrap_or_else(|_| chrono::Duration::seconds(i64::MAX / 1_000));
        let mut reclaimed = 0;

        for session_id in self.store.session_ids().await {
            let Some(handle) = self.store.get(&session_id).await else {
                continue;
            };
            let expired = {
                let session = handle.lock().await;
                !session.status.is_terminal() && session.idle_for(now) > idle_timeout
            };
            if expired && self.cancel(&session_id).await.is_ok() {
                info!(session_id = %session_id, "idle session reclaimed");
                reclaimed += 1;
            }
        }

        reclaimed
    }

    /// Spawns the background sweep that periodically reclaims idle
    /// sessions.
    pub fn spawn_idle_sweeper(manager: Arc<SessionManager>) -> JoinHandle<()> {
        let period = manager.config.sweep_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let reclaimed = manager.reclaim_idle().await;
                if reclaimed > 0 {
                    info!(reclaimed, "idle sweep finished");
                }
            }
        })
    }
}
