use super::model::{SynthesisRequest, SynthesisResult};
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use std::time::Duration;

/// Characters of text that participate in the cache key
pub const KEY_PREFIX_CHARS: usize = 100;

pub const DEFAULT_MAX_CAPACITY: u64 = 500;
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Cache fingerprint: voice, format and the first 100 characters of text.
///
/// Texts that share a 100 character prefix map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(voice_id: &str, output_format: &str, text: &str) -> Self {
        let prefix: String = text.chars().take(KEY_PREFIX_CHARS).collect();
        Self(format!("{}:{}:{}", voice_id, output_format, prefix))
    }

    pub fn for_request(request: &SynthesisRequest) -> Self {
        Self::new(request.voice_id(), request.output_format(), request.text())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Bounded, insertion-expiring cache of synthesis results.
///
/// New keys are always admitted; when full, the least recently used entry is evicted.
/// Lives for the whole process; clones share the same storage.
#[derive(Clone)]
pub struct SynthesisCache {
    inner: Cache<CacheKey, SynthesisResult>,
}

impl SynthesisCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .time_to_live(ttl)
            .build();

        Self { inner }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<SynthesisResult> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: CacheKey, result: SynthesisResult) {
        self.inner.insert(key, result).await;
    }

    /// Approximate number of live entries. Call `run_pending_tasks` first for an exact count.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }
}

impl Default for SynthesisCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CAPACITY, DEFAULT_TTL)
    }
}
