pub mod mocks;

use std::sync::Arc;

use mocks::MockStoragePort;
use stowage::{ChunkUploader, Config, ProgressTracker, SessionManager, SessionStore};

/// Fully wired coordinator over the mock backend.
pub struct TestCoordinator {
    pub port: Arc<MockStoragePort>,
    pub store: Arc<SessionStore>,
    pub manager: Arc<SessionManager>,
    pub uploader: Arc<ChunkUploader>,
    pub tracker: Arc<ProgressTracker>,
}

impl TestCoordinator {
    pub fn new() -> Self {
        Self::with_config(Config {
            bucket: "test-bucket".into(),
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let port = MockStoragePort::new();
        let store = Arc::new(SessionStore::new());
        let config = Arc::new(config);
        let manager = Arc::new(SessionManager::new(
            store.clone(),
            port.clone(),
            config.clone(),
        ));
        let uploader = Arc::new(ChunkUploader::new(store.clone(), port.clone()));
        let tracker = Arc::new(ProgressTracker::new(store.clone()));
        Self {
            port,
            store,
            manager,
            uploader,
            tracker,
        }
    }
}
