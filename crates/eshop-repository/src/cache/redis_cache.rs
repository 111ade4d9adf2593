//! Redis-backed distributed cache.

use super::{CacheEntryOptions, DistributedCache};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool, PoolConfig, Runtime};
use eshop_config::RedisConfig;
use eshop_core::{CancellationToken, EshopError, EshopResult};
use std::sync::Arc;
use tracing::debug;

/// Creates a Redis connection pool from configuration.
pub fn create_redis_pool(config: &RedisConfig) -> EshopResult<Arc<Pool>> {
    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| EshopError::cache_unavailable(format!("Failed to create Redis pool: {e}")))?;
    Ok(Arc::new(pool))
}

/// [`DistributedCache`] over a `deadpool-redis` pool.
pub struct RedisDistributedCache {
    pool: Arc<Pool>,
}

impl RedisDistributedCache {
    /// Creates a cache over the given pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> EshopResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| EshopError::cache_unavailable(format!("Failed to get Redis connection: {e}")))
    }

    /// Pings the server.
    pub async fn health_check(&self) -> EshopResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| EshopError::cache_unavailable(format!("Redis ping failed: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl DistributedCache for RedisDistributedCache {
    async fn get_string(&self, key: &str, cancel: &CancellationToken) -> EshopResult<Option<String>> {
        cancel
            .run(async {
                let mut conn = self.get_conn().await?;
                let value: Option<String> = conn.get(key).await.map_err(|e| {
                    EshopError::cache_unavailable(format!("Failed to get key '{key}': {e}"))
                })?;

                match &value {
                    Some(_) => debug!("Cache hit for key '{}'", key),
                    None => debug!("Cache miss for key '{}'", key),
                }

                Ok(value)
            })
            .await
    }

    async fn set_string(
        &self,
        key: &str,
        value: &str,
        options: CacheEntryOptions,
        cancel: &CancellationToken,
    ) -> EshopResult<()> {
        cancel
            .run(async {
                let mut conn = self.get_conn().await?;
                let result = match options.time_to_live {
                    Some(ttl) => {
                        let ttl_secs = ttl.as_secs().max(1);
                        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await
                    }
                    None => conn.set::<_, _, ()>(key, value).await,
                };
                result.map_err(|e| {
                    EshopError::cache_unavailable(format!("Failed to set key '{key}': {e}"))
                })?;

                debug!("Cached key '{}' with TTL {:?}", key, options.time_to_live);
                Ok(())
            })
            .await
    }

    async fn remove(&self, key: &str, cancel: &CancellationToken) -> EshopResult<()> {
        cancel
            .run(async {
                let mut conn = self.get_conn().await?;
                let deleted: i64 = conn.del(key).await.map_err(|e| {
                    EshopError::cache_unavailable(format!("Failed to delete key '{key}': {e}"))
                })?;

                debug!("Deleted key '{}': {}", key, deleted > 0);
                Ok(())
            })
            .await
    }
}
