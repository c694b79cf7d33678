//! # Identifier and Storage-Key Utilities
//!
//! Session-id generation and deterministic storage-key derivation.
//!
//! ## Key Layout
//!
//! ```text
//! {username}/{fileName}
//! ```
//!
//! The key is a pure function of the sanitized username and filename, so a
//! retried start for the same inputs targets the same object. Collisions
//! between callers reusing a filename are the caller's responsibility; this
//! layer does not deduplicate.

use chrono::Utc;
use uuid::Uuid;

/// Generates a unique identifier for an upload session.
///
/// Combines a millisecond timestamp (temporal ordering, cheap cleanup
/// analysis) with a v4 UUID (global uniqueness), e.g.
/// `1641987000000-550e8400-e29b-41d4-a716-446655440000`. Identifiers are
/// never reused for a different session.
pub fn generate_session_id() -> String {
    let timestamp = Utc::now().timestamp_millis();
    format!("{}-{}", timestamp, Uuid::new_v4())
}

/// Derives the destination storage key from the caller-supplied username
/// and filename.
pub fn build_storage_key(username: &str, file_name: &str) -> String {
    format!(
        "{}/{}",
        sanitize_path_component(username),
        sanitize_filename(file_name)
    )
}

/// Restricts a path component to characters safe for object keys.
fn sanitize_path_component(component: &str) -> String {
    component
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(50)
        .collect::<String>()
        .to_lowercase()
}

/// Strips path separators and control characters from a filename while
/// preserving the extension.
fn sanitize_filename(file_name: &str) -> String {
    let safe: String = file_name
        .trim()
        .chars()
        .filter(|c| !c.is_control() && !"/\\:*?\"<>|".contains(*c))
        .take(255)
        .collect();

    if safe.is_empty() {
        "unnamed".to_string()
    } else {
        safe
    }
}
