//! # Stowage
//!
//! A resumable large-object upload coordinator. The service sits between
//! an uploading client and an S3-compatible object store and lets one
//! logical file be transferred as an ordered sequence of independently
//! uploadable parts, later stitched into a single stored object.
//!
//! ## Architecture
//!
//! The crate follows a modular architecture with clear separation of
//! concerns:
//! - **Session Store**: concurrent index of in-flight sessions, one lock
//!   per session plus a briefly-held top-level map lock
//! - **Session Manager**: lifecycle transitions (start, complete, cancel,
//!   idle reclamation); the only caller of the backend's
//!   create/complete/abort operations
//! - **Chunk Uploader**: forwards one chunk at a time to the backend and
//!   records part metadata under the session lock
//! - **Progress Tracker**: read-only percentage/status view per session
//! - **Storage Port**: trait boundary over the minimal S3 multipart
//!   primitive, with an `aws-sdk-s3` adapter
//! - **Router/Handlers**: axum HTTP/JSON binding of the logical operations
//!
//! ## Upload Lifecycle
//!
//! ```text
//! 1. init      -> create session + backend multipart upload
//! 2. parts     -> upload chunks in any order, concurrently
//! 3. complete  -> finalize with the recorded parts, ascending
//! 4. progress  -> observe percentage at any point
//! 5. cancel    -> abort the backend upload and drop the session
//! ```
//!
//! Sessions with no chunk activity past a configured threshold are
//! reclaimed by a background sweep so the backend never accumulates
//! orphaned parts without bound.

pub mod config;
pub mod constants;
pub mod errors;
pub mod handlers;
pub mod keys;
pub mod manager;
pub mod middleware;
pub mod models;
pub mod progress;
pub mod router;
pub mod storage;
pub mod store;
pub mod uploader;

pub use config::Config;
pub use errors::{UploadError, UploadResult};
pub use manager::SessionManager;
pub use models::{StartUpload, StartedUpload, UploadSession, UploadStatus};
pub use progress::{ProgressReport, ProgressTracker};
pub use router::{build_router, AppState};
pub use storage::{
    CompletedPartSpec, S3StoragePort, StorageError, StoragePort, StorageResult,
    TimeoutStoragePort,
};
pub use store::SessionStore;
pub use uploader::ChunkUploader;
