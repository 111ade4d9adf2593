//! In-memory distributed cache.

use super::{CacheEntryOptions, DistributedCache};
use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Process-local [`DistributedCache`] for tests and runs without Redis.
/// Expired entries are dropped lazily on read.
#[derive(Debug, Default)]
pub struct InMemoryDistributedCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryDistributedCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live value for `key` without going through the trait.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        self.entries
            .read()
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Number of stored entries, including expired ones not yet dropped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[async_trait]
impl DistributedCache for InMemoryDistributedCache {
    async fn get_string(&self, key: &str, cancel: &CancellationToken) -> EshopResult<Option<String>> {
        cancel.ensure_active()?;

        let now = Instant::now();
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_string(
        &self,
        key: &str,
        value: &str,
        options: CacheEntryOptions,
        cancel: &CancellationToken,
    ) -> EshopResult<()> {
        cancel.ensure_active()?;

        let entry = Entry {
            value: value.to_string(),
            expires_at: options.time_to_live.map(|ttl| Instant::now() + ttl),
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &str, cancel: &CancellationToken) -> EshopResult<()> {
        cancel.ensure_active()?;
        self.entries.write().remove(key);
        Ok(())
    }
}
