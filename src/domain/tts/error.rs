use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("provider returned an empty audio stream")]
    EmptyResult,
    #[error("storage upload failed: {0}")]
    StorageUpload(String),
    #[error(transparent)]
    LocalWrite(#[from] anyhow::Error),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Provider(msg) => AppError::Provider(msg),
            TtsServiceError::EmptyResult => AppError::EmptyResult,
            TtsServiceError::StorageUpload(msg) => AppError::StorageUpload(msg),
            TtsServiceError::LocalWrite(e) => AppError::Unexpected(format!("{:#}", e)),
        }
    }
}
