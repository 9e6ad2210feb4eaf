use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::cache::{CacheEntry, GrantCache};
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;

/// Redis-backed grant cache. Entries are JSON under `{prefix}:grant:{key}` and
/// expire after the configured TTL.
#[derive(Clone)]
pub struct RedisGrantCache {
    pool: Pool,
    prefix: String,
    ttl_secs: u64,
}

impl RedisGrantCache {
    /// Create a pooled cache from a redis URL (e.g. redis://:password@host:6379/0)
    pub fn from_url(url: &str, prefix: &str, ttl: Duration) -> Result<Self, ApplicationError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self {
            pool,
            prefix: prefix.to_string(),
            ttl_secs: ttl.as_secs().max(1),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:grant:{}", self.prefix, key)
    }

    async fn conn(&self) -> ApplicationResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

#[async_trait]
impl GrantCache for RedisGrantCache {
    async fn get(&self, key: &str) -> ApplicationResult<Option<CacheEntry>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn
            .get(self.namespaced(key))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(entry) => Ok(Some(entry)),
                Err(err) => {
                    // Unreadable entries are treated as a miss.
                    tracing::warn!(error = %err, "discarding undecodable grant cache entry");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, entry: CacheEntry) -> ApplicationResult<()> {
        let json = serde_json::to_string(&entry)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let mut conn = self.conn().await?;
        conn.set_ex::<_, _, ()>(self.namespaced(key), json, self.ttl_secs)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }

    async fn evict(&self, key: &str) -> ApplicationResult<()> {
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(self.namespaced(key))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }
}
