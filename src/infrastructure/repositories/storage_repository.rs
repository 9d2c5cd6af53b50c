use async_trait::async_trait;
use std::path::Path;

/// Durable object storage for synthesized audio
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// Upload a local file under `key` and return its durable URL
    async fn upload(&self, local_path: &Path, key: &str) -> Result<String, String>;
}
