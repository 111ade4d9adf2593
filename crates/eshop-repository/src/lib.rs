//! # eShop Repository
//!
//! Storage for the basket aggregate, layered so that caching can be swapped
//! in without the handlers noticing:
//!
//! ```text
//! Handler
//!   ↓  Arc<dyn BasketRepository>
//! CachedBasketRepository          (cache-aside reads, write-through writes)
//!   ↓                    ↘
//! BasketRepositoryImpl     Arc<dyn DistributedCache>  (Redis / in-memory)
//!   ↓  DocumentSession (unit of work)
//! Arc<dyn DocumentStore>          (PostgreSQL JSONB / in-memory)
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                          ← BasketRepository trait
//!   impl/basket_repository_impl.rs     ← BasketRepositoryImpl
//!   cached/cached_basket_repository.rs ← CachedBasketRepository
//!   store/                             ← DocumentStore, DocumentSession, backends
//!   cache/                             ← DistributedCache, cache keys, backends
//!   pool.rs                            ← PostgreSQL pool and migrations
//! ```

pub mod cache;
pub mod cached;
pub mod pool;
pub mod store;
pub mod traits;
pub mod r#impl;

pub use cache::{create_redis_pool, CacheEntryOptions, DistributedCache, InMemoryDistributedCache, RedisDistributedCache};
pub use cached::CachedBasketRepository;
pub use pool::*;
pub use r#impl::BasketRepositoryImpl;
pub use store::{
    DocumentSession, DocumentStore, InMemoryDocumentStore, PendingOperation, PostgresDocumentStore,
};
pub use traits::*;
