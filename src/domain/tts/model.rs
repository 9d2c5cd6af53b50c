/// Polly rejects plain text longer than this per request
pub const MAX_TEXT_LENGTH: usize = 3000;

pub const DEFAULT_VOICE_ID: &str = "Joanna";
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3";

/// A validated synthesis request with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    text: String,
    voice_id: String,
    output_format: String,
    storage_key: Option<String>,
}

impl SynthesisRequest {
    /// Build a request. Missing or empty optional fields fall back to their defaults.
    pub fn new(
        text: impl Into<String>,
        voice_id: Option<String>,
        output_format: Option<String>,
        storage_key: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            voice_id: non_empty(voice_id).unwrap_or_else(|| DEFAULT_VOICE_ID.to_string()),
            output_format: non_empty(output_format)
                .unwrap_or_else(|| DEFAULT_OUTPUT_FORMAT.to_string()),
            storage_key: non_empty(storage_key),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn output_format(&self) -> &str {
        &self.output_format
    }

    pub fn storage_key(&self) -> Option<&str> {
        self.storage_key.as_deref()
    }

    /// Number of characters (not bytes) in the text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Leading slice of the text for log lines
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Where the synthesized audio ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    pub local_path: String,
    pub storage_url: Option<String>,
}
