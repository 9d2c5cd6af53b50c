use super::tts_repository::TtsRepository;
use crate::domain::tts::SynthesisRequest;
use async_trait::async_trait;
use aws_sdk_polly::{
    error::DisplayErrorContext,
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// Characters of text included in provider log lines
const LOG_PREVIEW_CHARS: usize = 50;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Always the neural engine, for the higher quality voices
    fn engine() -> Engine {
        Engine::Neural
    }

    /// Call AWS Polly and collect the whole audio stream
    async fn call_polly(&self, request: &SynthesisRequest) -> Result<Vec<u8>, String> {
        let voice_id = VoiceId::from(request.voice_id());
        let output_format = OutputFormat::from(request.output_format());
        let engine = Self::engine();

        tracing::info!(
            voice_id = ?voice_id,
            engine = ?engine,
            output_format = ?output_format,
            text_length = request.char_count(),
            text_preview = request.preview(LOG_PREVIEW_CHARS),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(request.text())
            .voice_id(voice_id.clone())
            .output_format(output_format)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %DisplayErrorContext(&e),
                    voice_id = ?voice_id,
                    engine = ?engine,
                    text_length = request.char_count(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", DisplayErrorContext(&e))
            })?;

        tracing::debug!("AWS Polly synthesize_speech successful, reading audio stream");

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let audio_data = self.call_polly(request).await?;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "polly",
            latency_ms = duration.as_millis(),
            characters_count = request.char_count(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}
