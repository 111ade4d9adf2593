//! Router tests over in-memory stores.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use eshop_config::ServerConfig;
use eshop_core::{CancellationSource, CancellationToken};
use eshop_repository::{BasketRepositoryImpl, CachedBasketRepository, InMemoryDistributedCache, InMemoryDocumentStore};
use eshop_rest::{create_router, AppState};
use eshop_service::basket_dispatcher;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

fn test_app_with(shutdown: CancellationToken) -> Router {
    let repository = CachedBasketRepository::new(
        Arc::new(BasketRepositoryImpl::new(Arc::new(InMemoryDocumentStore::new()))),
        Arc::new(InMemoryDistributedCache::new()),
    );
    let state = AppState::new(Arc::new(basket_dispatcher(Arc::new(repository))), shutdown);
    create_router(state, &ServerConfig::default())
}

fn test_app() -> Router {
    test_app_with(CancellationToken::none())
}

fn alice_basket() -> Value {
    json!({
        "cart": {
            "user_name": "alice",
            "items": [
                { "product_id": "p1", "product_name": "Pen", "quantity": 2, "price": "9.99" }
            ]
        }
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_store_then_get_basket() {
    let app = test_app();

    let (status, body) = send(&app, post_json("/basket", &alice_basket())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user_name"], "alice");

    let (status, body) = send(&app, empty("GET", "/basket/alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cart"]["user_name"], "alice");
    assert_eq!(body["data"]["cart"]["items"][0]["quantity"], 2);
    assert_eq!(body["data"]["cart"]["total_price"], "19.98");
}

#[tokio::test]
async fn test_get_missing_basket_is_404() {
    let app = test_app();

    let (status, body) = send(&app, empty("GET", "/basket/ghost")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_basket_is_400_with_violations() {
    let app = test_app();
    let invalid = json!({
        "cart": {
            "user_name": "alice",
            "items": [{ "product_id": "p1", "quantity": 0, "price": "1.00" }]
        }
    });

    let (status, body) = send(&app, post_json("/basket", &invalid)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
    assert_eq!(body["error"]["details"][0]["field"], "cart.items[0].quantity");
    assert_eq!(body["error"]["details"][0]["message"], "Quantity must be greater than zero");

    let (status, _) = send(&app, empty("GET", "/basket/alice")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overflowing_total_is_400() {
    let app = test_app();
    let huge = json!({
        "cart": {
            "user_name": "alice",
            "items": [{ "product_id": "p1", "quantity": 2, "price": "79228162514264337593543950335" }]
        }
    });

    let (status, body) = send(&app, post_json("/basket", &huge)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "cart.total_price");
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/basket")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "body");
}

#[tokio::test]
async fn test_delete_basket() {
    let app = test_app();
    send(&app, post_json("/basket", &alice_basket())).await;

    let (status, body) = send(&app, empty("DELETE", "/basket/alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_success"], true);

    let (status, body) = send(&app, empty("DELETE", "/basket/alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_success"], false);

    let (status, _) = send(&app, empty("GET", "/basket/alice")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_requests_cancelled_after_drain_are_499() {
    let source = CancellationSource::new();
    let app = test_app_with(source.token());
    source.cancel();

    let (status, body) = send(&app, empty("GET", "/basket/alice")).await;

    assert_eq!(status.as_u16(), 499);
    assert_eq!(body["error"]["code"], "CANCELLED");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app();

    let (status, body) = send(&app, empty("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());

    let (status, _) = send(&app, empty("GET", "/live")).await;
    assert_eq!(status, StatusCode::OK);
}
