//! Caching decorators.

mod cached_basket_repository;

pub use cached_basket_repository::CachedBasketRepository;
