//! Store (create or replace) basket command.

use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult, ShoppingCart, ValidationViolation};
use eshop_cqrs::{Request, RequestHandler, RequestKind, Validator};
use eshop_repository::BasketRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

/// Replaces the whole basket of `cart.user_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StoreBasketCommand {
    #[validate(nested)]
    pub cart: ShoppingCart,
}

impl StoreBasketCommand {
    #[must_use]
    pub fn new(cart: ShoppingCart) -> Self {
        Self { cart }
    }
}

impl Request for StoreBasketCommand {
    type Response = StoreBasketResult;
    const KIND: RequestKind = RequestKind::Command;
}

/// Rejects carts whose total does not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartTotalValidator;

impl Validator<StoreBasketCommand> for CartTotalValidator {
    fn validate(&self, command: &StoreBasketCommand) -> Vec<ValidationViolation> {
        if command.cart.total_price().is_some() {
            Vec::new()
        } else {
            vec![ValidationViolation::new("cart.total_price", "Cart total is out of range")]
        }
    }
}

/// The basket as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreBasketResult {
    pub user_name: String,
    pub cart: ShoppingCart,
}

/// Handles [`StoreBasketCommand`].
pub struct StoreBasketHandler {
    repository: Arc<dyn BasketRepository>,
}

impl StoreBasketHandler {
    #[must_use]
    pub fn new(repository: Arc<dyn BasketRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler<StoreBasketCommand> for StoreBasketHandler {
    async fn handle(&self, command: StoreBasketCommand, cancel: &CancellationToken) -> EshopResult<StoreBasketResult> {
        debug!(
            items = command.cart.items.len(),
            "Storing basket for {}", command.cart.user_name
        );
        let cart = self.repository.store_basket(command.cart, cancel).await?;
        Ok(StoreBasketResult {
            user_name: cart.user_name.clone(),
            cart,
        })
    }
}
