//! S3 implementation of the storage port via `aws-sdk-s3`.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_sdk_s3::Client;
use bytes::Bytes;

use super::{CompletedPartSpec, StorageError, StoragePort, StorageResult};

/// Storage port backed by an S3-compatible bucket.
///
/// The client and bucket name are injected at construction; there is no
/// process-wide client singleton. `public_url_base`, when set, is used to
/// build the object URL if the completion response carries no location.
pub struct S3StoragePort {
    client: Client,
    bucket: String,
    public_url_base: Option<String>,
}

impl S3StoragePort {
    pub fn new(client: Client, bucket: impl Into<String>, public_url_base: Option<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_url_base,
        }
    }

    fn object_url(&self, key: &str) -> String {
        match &self.public_url_base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!("s3://{}/{}", self.bucket, key),
        }
    }
}

#[async_trait]
impl StoragePort for S3StoragePort {
    async fn create_multipart_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        let output = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Create {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        output
            .upload_id()
            .map(str::to_string)
            .ok_or(StorageError::MissingField {
                key: key.to_string(),
                field: "uploadId",
            })
    }

    async fn upload_part(
        &self,
        key: &str,
        backend_upload_id: &str,
        part_number: u16,
        body: Bytes,
    ) -> StorageResult<String> {
        let output = self
            .client
            .upload_part()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(backend_upload_id)
            .part_number(i32::from(part_number))
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::UploadPart {
                key: key.to_string(),
                part_number,
                reason: e.to_string(),
            })?;

        output
            .e_tag()
            .map(str::to_string)
            .ok_or(StorageError::MissingField {
                key: key.to_string(),
                field: "eTag",
            })
    }

    async fn complete_multipart_upload(
        &self,
        key: &str,
        backend_upload_id: &str,
        parts: &[CompletedPartSpec],
    ) -> StorageResult<String> {
        let completed_parts: Vec<CompletedPart> = parts
            .iter()
            .map(|part| {
                CompletedPart::builder()
                    .part_number(i32::from(part.part_number))
                    .e_tag(&part.etag)
                    .build()
            })
            .collect();

        let output = self
            .client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(backend_upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed_parts))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| StorageError::Complete {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        Ok(output
            .location()
            .map(str::to_string)
            .unwrap_or_else(|| self.object_url(key)))
    }

    async fn abort_multipart_upload(
        &self,
        key: &str,
        backend_upload_id: &str,
    ) -> StorageResult<()> {
        self.client
            .abort_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(backend_upload_id)
            .send()
            .await
            .map_err(|e| StorageError::Abort {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
