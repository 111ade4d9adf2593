//! Distributed cache abstraction and its backends.
//!
//! Values are opaque strings; callers own serialization.

pub mod cache_keys;
mod memory;
mod redis_cache;

pub use memory::InMemoryDistributedCache;
pub use redis_cache::{create_redis_pool, RedisDistributedCache};

use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult};
use std::time::Duration;

/// Per-entry write options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheEntryOptions {
    /// Expiry relative to the write. `None` keeps the entry until removed.
    pub time_to_live: Option<Duration>,
}

impl CacheEntryOptions {
    /// Entry that never expires.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { time_to_live: None }
    }

    /// Entry that expires after `ttl`.
    #[must_use]
    pub const fn expiring_after(ttl: Duration) -> Self {
        Self {
            time_to_live: Some(ttl),
        }
    }
}

/// String cache shared across service instances.
///
/// Every call is I/O-bound and may fail independently of the document
/// store; failures surface as [`eshop_core::EshopError::CacheUnavailable`].
#[async_trait]
pub trait DistributedCache: Send + Sync {
    /// Gets a value, or `None` if the key is absent or expired.
    async fn get_string(&self, key: &str, cancel: &CancellationToken) -> EshopResult<Option<String>>;

    /// Sets a value, replacing any previous one.
    async fn set_string(
        &self,
        key: &str,
        value: &str,
        options: CacheEntryOptions,
        cancel: &CancellationToken,
    ) -> EshopResult<()>;

    /// Removes a key. Removing an absent key succeeds.
    async fn remove(&self, key: &str, cancel: &CancellationToken) -> EshopResult<()>;
}
