//! Repository trait definitions.

use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult, ShoppingCart};

/// Basket repository trait.
///
/// Every call takes the caller's cancellation token and passes it to each
/// I/O operation it performs.
#[async_trait]
pub trait BasketRepository: Send + Sync {
    /// Loads the basket for `user_name`.
    ///
    /// Fails with `NotFound` when the user has no basket.
    async fn get_basket(&self, user_name: &str, cancel: &CancellationToken) -> EshopResult<ShoppingCart>;

    /// Inserts or fully replaces the basket keyed by `cart.user_name`.
    async fn store_basket(&self, cart: ShoppingCart, cancel: &CancellationToken) -> EshopResult<ShoppingCart>;

    /// Deletes the basket for `user_name`. Returns whether a basket existed.
    async fn delete_basket(&self, user_name: &str, cancel: &CancellationToken) -> EshopResult<bool>;
}
