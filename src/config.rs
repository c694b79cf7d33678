//! # Configuration Management
//!
//! Runtime configuration for the upload coordinator, read once at startup
//! from `STOWAGE_*` environment variables with intelligent defaults for
//! every setting. The resulting `Config` is passed explicitly into the
//! components that need it at construction time.
//!
//! ## Configuration Options
//!
//! - `bucket`: destination bucket name (required for the service binary)
//! - `bind_addr`: socket address the HTTP binding listens on
//! - `max_file_size`: maximum declared file size in bytes (default: 10GB)
//! - `idle_timeout`: inactivity threshold before a session is reclaimed
//! - `sweep_interval`: period of the background reclamation sweep
//! - `request_timeout`: deadline applied to each storage backend call
//! - `public_url_base`: URL prefix used when the backend completion
//!   response carries no object location

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_FILE_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SWEEP_INTERVAL_SECS, ENV_BIND_ADDR, ENV_BUCKET,
    ENV_IDLE_TIMEOUT_SECS, ENV_MAX_FILE_SIZE, ENV_PUBLIC_URL_BASE, ENV_REQUEST_TIMEOUT_SECS,
    ENV_SWEEP_INTERVAL_SECS,
};

/// Service configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bucket: String,
    pub bind_addr: String,
    pub max_file_size: u64,
    pub idle_timeout: Duration,
    pub sweep_interval: Duration,
    pub request_timeout: Duration,
    pub public_url_base: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            public_url_base: None,
        }
    }
}

impl Config {
    /// Builds the configuration from the environment, falling back to the
    /// documented defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bucket: env::var(ENV_BUCKET).unwrap_or(defaults.bucket),
            bind_addr: env::var(ENV_BIND_ADDR).unwrap_or(defaults.bind_addr),
            max_file_size: parse_env(ENV_MAX_FILE_SIZE).unwrap_or(defaults.max_file_size),
            idle_timeout: parse_env(ENV_IDLE_TIMEOUT_SECS)
                .map(Duration::from_secs)
                .unwrap_or(defaults.idle_timeout),
            sweep_interval: parse_env(ENV_SWEEP_INTERVAL_SECS)
                .map(Duration::from_secs)
                .unwrap_or(defaults.sweep_interval),
            request_timeout: parse_env(ENV_REQUEST_TIMEOUT_SECS)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            public_url_base: env::var(ENV_PUBLIC_URL_BASE).ok(),
        }
    }
}

fn parse_env(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
