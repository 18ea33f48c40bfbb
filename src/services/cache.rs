use std::time::Duration;

/// In-memory TTL cache for generated explanations
///
/// Identical prompts within the TTL are answered without another call to
/// the language model.
#[derive(Clone)]
pub struct ExplanationCache {
    entries: moka::future::Cache<String, String>,
    ttl_secs: u64,
}

impl ExplanationCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries, ttl_secs }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let hit = self.entries.get(key).await;
        if hit.is_some() {
            tracing::trace!("Explanation cache hit: {}", key);
        } else {
            tracing::trace!("Explanation cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: String, value: String) {
        self.entries.insert(key, value).await;
    }

    /// Entry count is approximate until pending maintenance has run
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for an explanation: role plus its serialized prompt context
    pub fn explanation(role: &str, context_json: &str) -> String {
        format!("{}::{}", role, context_json)
    }
}
