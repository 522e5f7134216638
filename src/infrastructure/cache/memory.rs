use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::cache::SlugCounterCache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Counter value and its expiry; `None` never expires.
type Entry = (u64, Option<Instant>);

#[derive(Default)]
pub struct InMemorySlugCounterCache {
    entries: Mutex<HashMap<String, Entry>>,
}

fn is_live(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.is_none_or(|at| at > now)
}

impl InMemorySlugCounterCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ApplicationResult<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| ApplicationError::infrastructure("slug counter cache lock poisoned"))
    }

    /// Number of entries held, expired ones included until the next write.
    pub fn len(&self) -> ApplicationResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> ApplicationResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn live(entries: &HashMap<String, Entry>, key: &str, now: Instant) -> Option<u64> {
        entries
            .get(key)
            .filter(|(_, expires_at)| is_live(*expires_at, now))
            .map(|(value, _)| *value)
    }

    /// Store `value` under `key`, dropping every expired entry first.
    fn write(
        entries: &mut HashMap<String, Entry>,
        key: &str,
        value: u64,
        ttl: Duration,
        now: Instant,
    ) {
        entries.retain(|_, (_, expires_at)| is_live(*expires_at, now));
        // A TTL past the clock's range is kept forever.
        entries.insert(key.to_string(), (value, now.checked_add(ttl)));
    }
}

#[async_trait]
impl SlugCounterCache for InMemorySlugCounterCache {
    async fn get(&self, key: &str) -> ApplicationResult<Option<u64>> {
        let entries = self.lock()?;
        Ok(Self::live(&entries, key, Instant::now()))
    }

    async fn put(&self, key: &str, value: u64, ttl: Duration) -> ApplicationResult<()> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        Self::write(&mut entries, key, value, ttl, now);
        Ok(())
    }

    async fn increment(&self, key: &str, ttl: Duration) -> ApplicationResult<u64> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        let next = match Self::live(&entries, key, now) {
            None => 0,
            Some(current) => current.checked_add(1).ok_or_else(|| {
                ApplicationError::infrastructure(format!("slug counter `{key}` overflowed"))
            })?,
        };
        Self::write(&mut entries, key, next, ttl, now);
        Ok(next)
    }
}
