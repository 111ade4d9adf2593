//! Application wiring.

use eshop_config::{AppConfig, RedisConfig};
use eshop_core::CancellationToken;
use eshop_cqrs::Dispatcher;
use eshop_repository::{
    BasketRepository, BasketRepositoryImpl, CacheEntryOptions, CachedBasketRepository, DistributedCache, DocumentStore,
};
use eshop_rest::{create_router, AppState};
use eshop_service::basket_dispatcher;
use std::sync::Arc;
use tracing::info;

/// Builds the basket repository over `store`, decorated with the cache when
/// one is given.
pub fn compose_repository(
    store: Arc<dyn DocumentStore>,
    cache: Option<Arc<dyn DistributedCache>>,
    redis: &RedisConfig,
) -> Arc<dyn BasketRepository> {
    let repository: Arc<dyn BasketRepository> = Arc::new(BasketRepositoryImpl::new(store));

    match cache {
        Some(cache) => {
            let entry_options = redis
                .entry_ttl()
                .map_or_else(CacheEntryOptions::unbounded, CacheEntryOptions::expiring_after);
            info!(ttl = ?entry_options.time_to_live, "Basket cache enabled");
            Arc::new(CachedBasketRepository::new(repository, cache).with_entry_options(entry_options))
        }
        None => {
            info!("Basket cache disabled; reads go straight to the document store");
            repository
        }
    }
}

/// Builds the HTTP application for `repository`.
pub fn build_router(
    repository: Arc<dyn BasketRepository>,
    config: &AppConfig,
    shutdown: CancellationToken,
) -> axum::Router {
    let dispatcher: Arc<Dispatcher> = Arc::new(basket_dispatcher(repository));
    create_router(AppState::new(dispatcher, shutdown), &config.server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eshop_core::{CartItem, ShoppingCart};
    use eshop_repository::{InMemoryDistributedCache, InMemoryDocumentStore};
    use rust_decimal::Decimal;

    fn cart() -> ShoppingCart {
        ShoppingCart::new("alice").with_items(vec![CartItem::new("p1", "Pen", 1, Decimal::ONE)])
    }

    #[tokio::test]
    async fn test_cache_is_populated_when_enabled() {
        let cache = Arc::new(InMemoryDistributedCache::new());
        let repository = compose_repository(
            Arc::new(InMemoryDocumentStore::new()),
            Some(cache.clone() as Arc<dyn DistributedCache>),
            &RedisConfig::default(),
        );

        repository.store_basket(cart(), &CancellationToken::none()).await.unwrap();

        assert!(cache.peek("eshop:basket:alice").is_some());
    }

    #[tokio::test]
    async fn test_store_is_used_directly_without_cache() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let repository = compose_repository(store.clone(), None, &RedisConfig::default());

        repository.store_basket(cart(), &CancellationToken::none()).await.unwrap();

        assert_eq!(store.count("shopping_cart"), 1);
        let loaded = repository.get_basket("alice", &CancellationToken::none()).await.unwrap();
        assert_eq!(loaded, cart());
    }

    #[test]
    fn test_build_router() {
        let repository = compose_repository(Arc::new(InMemoryDocumentStore::new()), None, &RedisConfig::default());
        let _router = build_router(repository, &AppConfig::default(), CancellationToken::none());
    }
}
