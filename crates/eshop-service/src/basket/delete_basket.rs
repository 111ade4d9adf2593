//! Delete basket command.

use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult};
use eshop_cqrs::{Request, RequestHandler, RequestKind};
use eshop_repository::BasketRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

/// Removes the basket of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeleteBasketCommand {
    #[validate(custom(function = "eshop_core::validation::rules::not_blank", message = "UserName is required"))]
    pub user_name: String,
}

impl DeleteBasketCommand {
    #[must_use]
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }
}

impl Request for DeleteBasketCommand {
    type Response = DeleteBasketResult;
    const KIND: RequestKind = RequestKind::Command;
}

/// Outcome of a delete; `is_success` is false when no basket existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteBasketResult {
    pub is_success: bool,
}

/// Handles [`DeleteBasketCommand`].
pub struct DeleteBasketHandler {
    repository: Arc<dyn BasketRepository>,
}

impl DeleteBasketHandler {
    #[must_use]
    pub fn new(repository: Arc<dyn BasketRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler<DeleteBasketCommand> for DeleteBasketHandler {
    async fn handle(&self, command: DeleteBasketCommand, cancel: &CancellationToken) -> EshopResult<DeleteBasketResult> {
        debug!("Deleting basket for {}", command.user_name);
        let is_success = self.repository.delete_basket(&command.user_name, cancel).await?;
        Ok(DeleteBasketResult { is_success })
    }
}
