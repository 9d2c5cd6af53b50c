use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

pub const SERVICE_ERROR_MESSAGE: &str = "AWS service error occurred";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("Missing required parameter: text")]
    MissingParameter,

    #[error("Text exceeds maximum length of {max} characters")]
    LengthExceeded { max: usize, actual: usize },

    #[error("Speech provider error: {0}")]
    Provider(String),

    #[error("Speech provider returned no audio")]
    EmptyResult,

    #[error("Storage upload failed: {0}")]
    StorageUpload(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Error body returned to callers: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) | Self::MissingParameter | Self::LengthExceeded { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Provider(_)
            | Self::EmptyResult
            | Self::StorageUpload(_)
            | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the public error body.
    ///
    /// Client faults echo the validation reason. Server faults only ever
    /// expose a generic category message.
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            Self::InvalidPayload(_) => "Invalid request payload".to_string(),
            Self::MissingParameter | Self::LengthExceeded { .. } => self.to_string(),
            Self::Provider(_) | Self::StorageUpload(_) => SERVICE_ERROR_MESSAGE.to_string(),
            Self::EmptyResult | Self::Unexpected(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        ErrorResponse { error }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
