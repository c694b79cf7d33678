//! # Application Constants
//!
//! Application-wide constants for the upload coordinator. Centralizing
//! limits and environment-variable names here keeps the configuration layer
//! and the validation layer consistent.
//!
//! ## Size Limits
//!
//! Defaults follow the S3 multipart contract: part numbers 1..=10_000, each
//! part except the last at least 5 MiB.
//!
//! ## Environment Variables
//!
//! All service configuration is read from `STOWAGE_*` variables at startup.

/// Default maximum declared file size (10GB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_737_418_240;

/// Highest part number accepted for a single upload (S3 multipart contract)
pub const MAX_PART_NUMBER: u16 = 10_000;

/// Default idle threshold after which a session is reclaimed (1 hour)
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 3_600;

/// Default interval between idle-session sweeps (5 minutes)
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Default deadline for a single storage-port call (5 minutes)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Default socket address the HTTP binding listens on
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Request body ceiling for the chunk route (160MB, above any sane part)
pub const MAX_CHUNK_BODY_BYTES: usize = 167_772_160;

/// Environment variable naming the destination bucket
pub const ENV_BUCKET: &str = "STOWAGE_BUCKET";

/// Environment variable for the HTTP bind address
pub const ENV_BIND_ADDR: &str = "STOWAGE_BIND_ADDR";

/// Environment variable overriding the maximum declared file size
pub const ENV_MAX_FILE_SIZE: &str = "STOWAGE_MAX_FILE_SIZE";

/// Environment variable overriding the idle-session timeout (seconds)
pub const ENV_IDLE_TIMEOUT_SECS: &str = "STOWAGE_IDLE_TIMEOUT_SECS";

/// Environment variable overriding the sweep interval (seconds)
pub const ENV_SWEEP_INTERVAL_SECS: &str = "STOWAGE_SWEEP_INTERVAL_SECS";

/// Environment variable overriding the per-call storage deadline (seconds)
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "STOWAGE_REQUEST_TIMEOUT_SECS";

/// Environment variable for the public URL prefix used when the backend
/// completion response carries no location
pub const ENV_PUBLIC_URL_BASE: &str = "STOWAGE_PUBLIC_URL_BASE";
