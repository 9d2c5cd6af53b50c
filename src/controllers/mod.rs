pub mod envelope;
pub mod health;
pub mod tts;

pub use envelope::InvocationResponse;
pub use tts::TtsController;
