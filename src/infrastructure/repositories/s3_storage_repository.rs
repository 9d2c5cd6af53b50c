use super::storage_repository::StorageRepository;
use async_trait::async_trait;
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, Client as S3Client};
use std::path::Path;
use std::sync::Arc;

/// S3 implementation of the storage repository
pub struct S3StorageRepository {
    s3_client: Arc<S3Client>,
    bucket: String,
}

impl S3StorageRepository {
    pub fn new(s3_client: Arc<S3Client>, bucket: String) -> Self {
        Self { s3_client, bucket }
    }

    /// Virtual-hosted style URL for an object in the bucket
    pub fn object_url(bucket: &str, key: &str) -> String {
        let encoded_key = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!("https://{}.s3.amazonaws.com/{}", bucket, encoded_key)
    }

    fn content_type_for(local_path: &Path) -> &'static str {
        match local_path.extension().and_then(|ext| ext.to_str()) {
            Some("mp3") => "audio/mpeg",
            Some("ogg_vorbis") | Some("ogg") => "audio/ogg",
            Some("pcm") => "audio/pcm",
            Some("json") => "application/json",
            _ => "application/octet-stream",
        }
    }
}

#[async_trait]
impl StorageRepository for S3StorageRepository {
    async fn upload(&self, local_path: &Path, key: &str) -> Result<String, String> {
        let body = ByteStream::from_path(local_path).await.map_err(|e| {
            tracing::error!(
                error = %e,
                local_path = %local_path.display(),
                "Failed to open audio file for upload"
            );
            format!("Failed to read {}: {}", local_path.display(), e)
        })?;

        tracing::info!(bucket = %self.bucket, key = %key, "Uploading audio to S3");

        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(Self::content_type_for(local_path))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %DisplayErrorContext(&e),
                    bucket = %self.bucket,
                    key = %key,
                    "S3 put_object failed"
                );
                format!("S3 upload error: {}", DisplayErrorContext(&e))
            })?;

        let url = Self::object_url(&self.bucket, key);
        tracing::info!(s3_url = %url, "Audio uploaded to S3");

        Ok(url)
    }
}
