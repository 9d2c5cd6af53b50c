use super::cache::{CacheKey, SynthesisCache};
use super::error::TtsServiceError;
use super::model::{SynthesisRequest, SynthesisResult};
use crate::infrastructure::repositories::{StorageRepository, TtsRepository};
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Characters of text included in log lines
const LOG_PREVIEW_CHARS: usize = 50;

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    storage_repo: Option<Arc<dyn StorageRepository>>,
    audio_dir: PathBuf,
    cache: SynthesisCache,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        storage_repo: Option<Arc<dyn StorageRepository>>,
        audio_dir: PathBuf,
        cache: SynthesisCache,
    ) -> Self {
        Self {
            tts_repo,
            storage_repo,
            audio_dir,
            cache,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize a validated request, cache-aside
    ///
    /// This operation:
    /// - Returns the cached result when the request fingerprint is known
    /// - Otherwise calls the provider, writes the audio under the audio dir
    ///   and uploads it when a storage key is present
    /// - Caches only complete results
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisResult, TtsServiceError> {
        let cache_key = CacheKey::for_request(&request);

        // 1. Return cached result if present
        if let Some(cached_result) = self.cache.get(&cache_key).await {
            tracing::info!(
                text_preview = request.preview(LOG_PREVIEW_CHARS),
                local_path = %cached_result.local_path,
                "Cache hit for text snippet"
            );
            return Ok(cached_result);
        }

        tracing::debug!(cache_key = cache_key.as_str(), "Cache miss");
        tracing::info!(
            voice_id = request.voice_id(),
            output_format = request.output_format(),
            text_length = request.char_count(),
            text_preview = request.preview(LOG_PREVIEW_CHARS),
            "Synthesizing speech for text snippet"
        );

        // 2. Call the provider
        let audio_data = self
            .tts_repo
            .synthesize(&request)
            .await
            .map_err(TtsServiceError::Provider)?;

        if audio_data.is_empty() {
            tracing::error!(
                voice_id = request.voice_id(),
                "No audio stream returned from provider"
            );
            return Err(TtsServiceError::EmptyResult);
        }

        // 3. Save to local file
        let local_path = self.write_audio(&request, &audio_data).await?;

        // 4. Optionally upload
        let storage_url = match request.storage_key() {
            Some(key) => Some(self.upload(&local_path, key).await?),
            None => None,
        };

        // 5. Cache the result
        let result = SynthesisResult {
            local_path: local_path.to_string_lossy().into_owned(),
            storage_url,
        };
        self.cache.insert(cache_key, result.clone()).await;

        tracing::info!(
            local_path = %result.local_path,
            s3_url = ?result.storage_url,
            audio_size = audio_data.len(),
            "TTS result cached"
        );

        Ok(result)
    }
}

impl TtsService {
    /// Local file for a fresh synthesis: `<voice>_<uuid>.<format>`
    fn audio_path(&self, request: &SynthesisRequest) -> PathBuf {
        let file_name = format!(
            "{}_{}.{}",
            sanitize_segment(request.voice_id()),
            Uuid::new_v4().simple(),
            sanitize_segment(request.output_format())
        );
        self.audio_dir.join(file_name)
    }

    async fn write_audio(
        &self,
        request: &SynthesisRequest,
        audio_data: &[u8],
    ) -> Result<PathBuf, TtsServiceError> {
        let local_path = self.audio_path(request);

        tokio::fs::write(&local_path, audio_data)
            .await
            .with_context(|| format!("failed to write audio to {}", local_path.display()))?;

        tracing::debug!(
            local_path = %local_path.display(),
            audio_size = audio_data.len(),
            "Audio written to local storage"
        );

        Ok(local_path)
    }

    async fn upload(&self, local_path: &Path, key: &str) -> Result<String, TtsServiceError> {
        let storage_repo = self.storage_repo.as_ref().ok_or_else(|| {
            tracing::error!(key = %key, "Storage key supplied but no bucket is configured");
            TtsServiceError::StorageUpload("no storage bucket configured".to_string())
        })?;

        storage_repo
            .upload(local_path, key)
            .await
            .map_err(TtsServiceError::StorageUpload)
    }
}

/// Keep only characters that are safe inside a file name
fn sanitize_segment(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        "audio".to_string()
    } else {
        cleaned
    }
}
