//! `CachedBasketRepository`: cache-aside reads and write-through writes.
//!
//! The document store is the source of truth. Reads consult the cache first
//! and backfill it on a miss; writes and deletes go to the store first and
//! only then touch the cache. The cache may briefly lag the store but must
//! never contradict a committed write, so a cache failure after a committed
//! mutation either invalidates the entry or fails the call with
//! `CacheUnavailable`.

use crate::cache::cache_keys;
use crate::{BasketRepository, CacheEntryOptions, DistributedCache};
use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopError, EshopResult, ShoppingCart};
use std::sync::Arc;
use tracing::{debug, warn};

/// [`BasketRepository`] decorator adding a [`DistributedCache`].
pub struct CachedBasketRepository {
    inner: Arc<dyn BasketRepository>,
    cache: Arc<dyn DistributedCache>,
    entry_options: CacheEntryOptions,
}

impl CachedBasketRepository {
    /// Wraps `inner`; cache entries never expire.
    #[must_use]
    pub fn new(inner: Arc<dyn BasketRepository>, cache: Arc<dyn DistributedCache>) -> Self {
        Self {
            inner,
            cache,
            entry_options: CacheEntryOptions::unbounded(),
        }
    }

    /// Sets the options applied to every cache write.
    #[must_use]
    pub fn with_entry_options(mut self, entry_options: CacheEntryOptions) -> Self {
        self.entry_options = entry_options;
        self
    }

    /// Looks up the cache. Any failure other than cancellation, and any
    /// entry that does not decode, counts as a miss.
    async fn read_cached(&self, key: &str, cancel: &CancellationToken) -> EshopResult<Option<ShoppingCart>> {
        let cached = match self.cache.get_string(key, cancel).await {
            Ok(cached) => cached,
            Err(EshopError::Cancelled) => return Err(EshopError::Cancelled),
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, falling back to store");
                return Ok(None);
            }
        };

        let Some(json) = cached else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(cart) => Ok(Some(cart)),
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                Ok(None)
            }
        }
    }

    async fn write_cached(&self, key: &str, cart: &ShoppingCart, cancel: &CancellationToken) -> EshopResult<()> {
        let json = serde_json::to_string(cart)?;
        self.cache.set_string(key, &json, self.entry_options, cancel).await
    }

    /// Drops `key` after a committed mutation.
    ///
    /// If the caller cancelled, the removal is retried detached from its
    /// token and the call still reports `Cancelled`; the committed change
    /// must not be shadowed by the old entry.
    async fn invalidate(&self, key: &str, cancel: &CancellationToken) -> EshopResult<()> {
        match self.cache.remove(key, cancel).await {
            Ok(()) => Ok(()),
            Err(EshopError::Cancelled) => {
                self.cache
                    .remove(key, &CancellationToken::none())
                    .await
                    .map_err(|e| inconsistent(key, e))?;
                Err(EshopError::Cancelled)
            }
            Err(e) => Err(inconsistent(key, e)),
        }
    }
}

/// Wraps a cache failure that leaves the cache contradicting the store.
fn inconsistent(key: &str, error: EshopError) -> EshopError {
    match error {
        EshopError::CacheUnavailable(message) => {
            EshopError::cache_unavailable(format!("'{key}' may be stale: {message}"))
        }
        other => EshopError::cache_unavailable(format!("'{key}' may be stale: {other}")),
    }
}

#[async_trait]
impl BasketRepository for CachedBasketRepository {
    async fn get_basket(&self, user_name: &str, cancel: &CancellationToken) -> EshopResult<ShoppingCart> {
        let key = cache_keys::basket(user_name);

        if let Some(cart) = self.read_cached(&key, cancel).await? {
            debug!(key = %key, "Basket cache hit");
            return Ok(cart);
        }
        debug!(key = %key, "Basket cache miss");

        let cart = self.inner.get_basket(user_name, cancel).await?;

        // Best effort: the value read from the store is valid either way.
        if let Err(e) = self.write_cached(&key, &cart, cancel).await {
            warn!(key = %key, error = %e, "Failed to populate basket cache");
        }

        Ok(cart)
    }

    async fn store_basket(&self, cart: ShoppingCart, cancel: &CancellationToken) -> EshopResult<ShoppingCart> {
        let stored = self.inner.store_basket(cart, cancel).await?;
        let key = cache_keys::basket(&stored.user_name);

        if let Err(e) = self.write_cached(&key, &stored, cancel).await {
            if !matches!(e, EshopError::Cancelled) {
                warn!(key = %key, error = %e, "Write-through failed, invalidating cached basket");
            }
            self.invalidate(&key, cancel).await?;
        }
        Ok(stored)
    }

    async fn delete_basket(&self, user_name: &str, cancel: &CancellationToken) -> EshopResult<bool> {
        let deleted = self.inner.delete_basket(user_name, cancel).await?;
        let key = cache_keys::basket(user_name);
        self.invalidate(&key, cancel).await?;
        Ok(deleted)
    }
}
