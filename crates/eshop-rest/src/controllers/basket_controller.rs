//! Basket controller. Each route sends exactly one request through the
//! dispatcher and maps its result to a response body.

use crate::{
    extractors::JsonBody,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use eshop_core::ShoppingCart;
use eshop_service::{DeleteBasketCommand, GetBasketQuery, StoreBasketCommand};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBasketResponse {
    pub cart: ShoppingCart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreBasketRequest {
    pub cart: ShoppingCart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreBasketResponse {
    pub user_name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteBasketResponse {
    pub is_success: bool,
}

/// Creates the basket router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(store_basket))
        .route("/:user_name", get(get_basket).delete(delete_basket))
}

/// Get the basket of a user.
async fn get_basket(State(state): State<AppState>, Path(user_name): Path<String>) -> ApiResult<GetBasketResponse> {
    debug!("Get basket request: {}", user_name);

    let result = state
        .dispatcher
        .send(GetBasketQuery::new(user_name), &state.shutdown)
        .await?;
    ok(GetBasketResponse { cart: result.cart })
}

/// Create or replace the basket of `cart.user_name`.
async fn store_basket(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<StoreBasketRequest>,
) -> ApiResult<StoreBasketResponse> {
    debug!("Store basket request: {}", request.cart.user_name);

    let result = state
        .dispatcher
        .send(StoreBasketCommand::new(request.cart), &state.shutdown)
        .await?;
    ok(StoreBasketResponse {
        user_name: result.user_name,
    })
}

/// Delete the basket of a user.
async fn delete_basket(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> ApiResult<DeleteBasketResponse> {
    debug!("Delete basket request: {}", user_name);

    let result = state
        .dispatcher
        .send(DeleteBasketCommand::new(user_name), &state.shutdown)
        .await?;
    ok(DeleteBasketResponse {
        is_success: result.is_success,
    })
}
