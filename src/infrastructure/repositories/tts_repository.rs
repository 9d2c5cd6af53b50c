use crate::domain::tts::SynthesisRequest;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (AWS Polly in production, fakes in tests).
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize the request text with its voice and output format
    ///
    /// Returns the raw audio bytes exactly as the provider produced them.
    /// An empty vector means the provider succeeded without audio.
    ///
    /// # Errors
    /// Returns error if the provider rejects the request or cannot be reached
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, String>;
}
