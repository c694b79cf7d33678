//! # Session Store
//!
//! Concurrent index of in-flight upload sessions.
//!
//! The outer `RwLock<HashMap>` guards only existence bookkeeping (insert,
//! lookup, remove) and is held for the duration of a map operation, never
//! across I/O. Each session lives behind its own `Mutex`, so chunk
//! recording for one session never blocks another session's activity.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::models::UploadSession;

/// Shared handle to one session's mutable state.
pub type SessionHandle = Arc<Mutex<UploadSession>>;

/// Thread-safe map from session id to session state.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new session and returns its handle. The id is generated
    /// fresh per session and never reused, so an existing entry under the
    /// same id is a logic error; the insert replaces it regardless.
    pub async fn insert(&self, session: UploadSession) -> SessionHandle {
        let id = session.session_id.clone();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        handle
    }

    pub async fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn remove(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.write().await.remove(session_id)
    }

    /// Snapshot of current session ids, for the idle sweep.
    pub async fn session_ids(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
