//! Basket slices and their registration.

mod delete_basket;
mod get_basket;
mod store_basket;

pub use delete_basket::*;
pub use get_basket::*;
pub use store_basket::*;

use eshop_cqrs::{DerivedValidator, Dispatcher, DispatcherBuilder};
use eshop_repository::BasketRepository;
use std::sync::Arc;

/// Registers the basket handlers and validators on `builder`.
#[must_use]
pub fn register_basket(builder: DispatcherBuilder, repository: Arc<dyn BasketRepository>) -> DispatcherBuilder {
    builder
        .register_handler::<GetBasketQuery, _>(GetBasketHandler::new(Arc::clone(&repository)))
        .register_validator::<GetBasketQuery, _>(DerivedValidator)
        .register_handler::<StoreBasketCommand, _>(StoreBasketHandler::new(Arc::clone(&repository)))
        .register_validator::<StoreBasketCommand, _>(DerivedValidator)
        .register_validator::<StoreBasketCommand, _>(CartTotalValidator)
        .register_handler::<DeleteBasketCommand, _>(DeleteBasketHandler::new(repository))
        .register_validator::<DeleteBasketCommand, _>(DerivedValidator)
}

/// Builds a dispatcher serving every basket request.
#[must_use]
pub fn basket_dispatcher(repository: Arc<dyn BasketRepository>) -> Dispatcher {
    register_basket(Dispatcher::builder(), repository).build()
}

#[cfg(test)]
pub(crate) mod mocks {
    use async_trait::async_trait;
    use eshop_core::{CancellationToken, EshopResult, ShoppingCart};
    use eshop_repository::BasketRepository;

    mockall::mock! {
        pub BasketRepo {}

        #[async_trait]
        impl BasketRepository for BasketRepo {
            async fn get_basket(&self, user_name: &str, cancel: &CancellationToken) -> EshopResult<ShoppingCart>;
            async fn store_basket(&self, cart: ShoppingCart, cancel: &CancellationToken) -> EshopResult<ShoppingCart>;
            async fn delete_basket(&self, user_name: &str, cancel: &CancellationToken) -> EshopResult<bool>;
        }
    }
}
