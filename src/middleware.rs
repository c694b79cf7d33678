//! # Request Validation
//!
//! Validation helpers applied before any backend call so rejected requests
//! have no side effects. All functions return `UploadResult<()>` and
//! integrate with the coordinator's error taxonomy.

use crate::constants::MAX_PART_NUMBER;
use crate::errors::{UploadError, UploadResult};
use crate::models::StartUpload;

/// Validation entry points for the upload API.
pub struct ValidationMiddleware;

impl ValidationMiddleware {
    /// Validates the parameters of a start-upload request.
    ///
    /// Rejects empty usernames/filenames, a zero declared size, sizes above
    /// the configured ceiling, and content types outside the whitelist.
    pub fn validate_start(request: &StartUpload, max_file_size: u64) -> UploadResult<()> {
        if request.username.trim().is_empty() {
            return Err(UploadError::Validation("username must not be empty".into()));
        }
        if request.file_name.trim().is_empty() {
            return Err(UploadError::Validation("fileName must not be empty".into()));
        }
        if request.total_size == 0 {
            return Err(UploadError::Validation(
                "totalSize must be greater than zero".into(),
            ));
        }
        Self::validate_file_size(request.total_size, max_file_size)?;
        Self::validate_content_type(&request.content_type)
    }

    /// Validates that a declared file size is within the configured limit.
    pub fn validate_file_size(size: u64, max_size: u64) -> UploadResult<()> {
        if size > max_size {
            return Err(UploadError::Validation(format!(
                "totalSize {} exceeds maximum of {} bytes",
                size, max_size
            )));
        }
        Ok(())
    }

    /// Validates that a content type is supported by the service.
    ///
    /// Based on the client-declared MIME type; the stored object's real
    /// content is not inspected.
    pub fn validate_content_type(content_type: &str) -> UploadResult<()> {
        const ALLOWED_TYPES: &[&str] = &[
            "image/",
            "video/",
            "audio/",
            "text/",
            "application/json",
            "application/pdf",
            "application/zip",
            "application/octet-stream",
        ];

        if !ALLOWED_TYPES
            .iter()
            .any(|&allowed| content_type.starts_with(allowed))
        {
            return Err(UploadError::Validation(format!(
                "unsupported contentType '{}'",
                content_type
            )));
        }
        Ok(())
    }

    /// Validates a chunk's part number against the multipart contract.
    pub fn validate_part_number(part_number: u16) -> UploadResult<()> {
        if part_number == 0 || part_number > MAX_PART_NUMBER {
            return Err(UploadError::Validation(format!(
                "partNumber must be between 1 and {}",
                MAX_PART_NUMBER
            )));
        }
        Ok(())
    }

    /// Rejects empty chunk bodies before any backend traffic.
    pub fn validate_chunk_body(len: usize) -> UploadResult<()> {
        if len == 0 {
            return Err(UploadError::Validation("chunk body must not be empty".into()));
        }
        Ok(())
    }
}
