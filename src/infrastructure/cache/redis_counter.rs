// src/infrastructure/cache/redis_counter.rs
use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::cache::SlugCounterCache;
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;

// Reads, bumps and re-expires the counter in one step so concurrent callers
// never receive the same value. A missing key is created with 0.
const INCREMENT_SCRIPT: &str = r#"
    local cur = redis.call('GET', KEYS[1])
    if not cur then
        redis.call('SET', KEYS[1], 0, 'EX', ARGV[1])
        return 0
    end
    local n = redis.call('INCR', KEYS[1])
    redis.call('EXPIRE', KEYS[1], ARGV[1])
    return n
"#;

#[derive(Clone)]
pub struct RedisSlugCounterCache {
    pool: Pool,
}

impl RedisSlugCounterCache {
    /// Create a new Redis backed counter cache from a redis URL (e.g. redis://:password@host:6379/0)
    pub fn from_url(url: &str) -> Result<Self, ApplicationError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self { pool })
    }

    async fn connection(&self) -> ApplicationResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

// Redis rejects EX 0, so sub-second TTLs round up.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl SlugCounterCache for RedisSlugCounterCache {
    async fn get(&self, key: &str) -> ApplicationResult<Option<u64>> {
        let mut conn = self.connection().await?;
        let val: Option<u64> = conn
            .get(key)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(val)
    }

    async fn put(&self, key: &str, value: u64, ttl: Duration) -> ApplicationResult<()> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_secs(ttl))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }

    async fn increment(&self, key: &str, ttl: Duration) -> ApplicationResult<u64> {
        let mut conn = self.connection().await?;
        let next: u64 = redis::cmd("EVAL")
            .arg(INCREMENT_SCRIPT)
            .arg(1)
            .arg(key)
            .arg(ttl_secs(ttl))
            .query_async(&mut conn)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(next)
    }
}
