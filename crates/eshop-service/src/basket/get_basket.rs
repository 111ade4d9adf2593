//! Get basket query.

use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult, ShoppingCart};
use eshop_cqrs::{Request, RequestHandler, RequestKind};
use eshop_repository::BasketRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

/// Loads the basket of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GetBasketQuery {
    #[validate(custom(function = "eshop_core::validation::rules::not_blank", message = "UserName is required"))]
    pub user_name: String,
}

impl GetBasketQuery {
    #[must_use]
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }
}

impl Request for GetBasketQuery {
    type Response = GetBasketResult;
    const KIND: RequestKind = RequestKind::Query;
}

/// The requested basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBasketResult {
    pub cart: ShoppingCart,
}

/// Handles [`GetBasketQuery`].
pub struct GetBasketHandler {
    repository: Arc<dyn BasketRepository>,
}

impl GetBasketHandler {
    #[must_use]
    pub fn new(repository: Arc<dyn BasketRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler<GetBasketQuery> for GetBasketHandler {
    async fn handle(&self, query: GetBasketQuery, cancel: &CancellationToken) -> EshopResult<GetBasketResult> {
        debug!("Getting basket for {}", query.user_name);
        let cart = self.repository.get_basket(&query.user_name, cancel).await?;
        Ok(GetBasketResult { cart })
    }
}
