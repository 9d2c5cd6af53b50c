pub mod cache;
pub mod dto;
pub mod error;
pub mod model;
pub mod service;

pub use cache::{CacheKey, SynthesisCache};
pub use dto::{SynthesisPayload, SynthesisResponse};
pub use error::TtsServiceError;
pub use model::{SynthesisRequest, SynthesisResult, MAX_TEXT_LENGTH};
pub use service::{TtsService, TtsServiceApi};
