use serde::{Deserialize, Serialize};

/// Inner business payload of an invocation
#[derive(Debug, Deserialize)]
pub struct SynthesisPayload {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub output_format: Option<String>,
    #[serde(default)]
    pub s3_key: Option<String>,
    #[serde(default)]
    pub storage_key: Option<String>,
}

impl SynthesisPayload {
    /// `s3_key` takes precedence over `storage_key`
    pub fn key(&self) -> Option<String> {
        self.s3_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| self.storage_key.clone())
    }
}

/// Success body returned to callers
#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesisResponse {
    pub message: String,
    pub voice_id: String,
    pub output_format: String,
    pub local_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_url: Option<String>,
}
