// src/application/ports/cache.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use std::time::Duration;

/// Tag every cache key is scoped under.
pub const CACHE_NAMESPACE: &str = "sluggable";

pub fn cache_key(slug: &str) -> String {
    format!("{CACHE_NAMESPACE}:{slug}")
}

#[async_trait]
pub trait SlugCounterCache: Send + Sync {
    async fn get(&self, key: &str) -> ApplicationResult<Option<u64>>;

    async fn put(&self, key: &str, value: u64, ttl: Duration) -> ApplicationResult<()>;

    /// Return the next counter for `key`, refreshing its TTL.
    ///
    /// The first call stores and returns 0. Backends that can serialize the
    /// read-modify-write should override this; the provided version is not atomic.
    async fn increment(&self, key: &str, ttl: Duration) -> ApplicationResult<u64> {
        let next = match self.get(key).await? {
            None => 0,
            Some(current) => current.saturating_add(1),
        };
        self.put(key, next, ttl).await?;
        Ok(next)
    }
}
