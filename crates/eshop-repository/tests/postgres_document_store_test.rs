//! Integration tests for `PostgresDocumentStore`.
//!
//! These tests run against a real PostgreSQL database using testcontainers.
//! Requires Docker; run with `cargo test -- --ignored`.

mod common;

use common::TestDatabase;
use eshop_core::{CancellationToken, CartItem, EshopError, ShoppingCart};
use eshop_repository::{
    BasketRepository, BasketRepositoryImpl, DocumentStore, PendingOperation, PostgresDocumentStore,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

fn alice() -> ShoppingCart {
    ShoppingCart::new("alice").with_items(vec![CartItem::new("p1", "Pen", 2, Decimal::new(999, 2))])
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    db.pool().health_check().await.expect("Health check failed");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_basket_round_trip_through_jsonb() {
    let db = TestDatabase::new().await;
    let repo = BasketRepositoryImpl::new(Arc::new(PostgresDocumentStore::new(db.pool())));
    let cancel = CancellationToken::none();

    repo.store_basket(alice(), &cancel).await.expect("Failed to store basket");
    let loaded = repo.get_basket("alice", &cancel).await.expect("Failed to load basket");

    assert_eq!(loaded, alice());
    assert_eq!(loaded.total_price(), Some(Decimal::new(1998, 2)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_store_replaces_existing_document() {
    let db = TestDatabase::new().await;
    let repo = BasketRepositoryImpl::new(Arc::new(PostgresDocumentStore::new(db.pool())));
    let cancel = CancellationToken::none();

    repo.store_basket(alice(), &cancel).await.unwrap();
    repo.store_basket(ShoppingCart::new("alice"), &cancel).await.unwrap();

    assert!(repo.get_basket("alice", &cancel).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_and_not_found() {
    let db = TestDatabase::new().await;
    let repo = BasketRepositoryImpl::new(Arc::new(PostgresDocumentStore::new(db.pool())));
    let cancel = CancellationToken::none();

    repo.store_basket(alice(), &cancel).await.unwrap();
    assert!(repo.delete_basket("alice", &cancel).await.unwrap());
    assert!(!repo.delete_basket("alice", &cancel).await.unwrap());

    let err = repo.get_basket("alice", &cancel).await.unwrap_err();
    assert!(matches!(err, EshopError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_commit_reports_rows_affected_per_operation() {
    let db = TestDatabase::new().await;
    let store = PostgresDocumentStore::new(db.pool());
    let cancel = CancellationToken::none();

    let affected = store
        .commit(
            vec![
                PendingOperation::Store {
                    collection: "things",
                    id: "a".to_string(),
                    body: json!({ "v": 1 }),
                },
                PendingOperation::Delete {
                    collection: "things",
                    id: "missing".to_string(),
                },
            ],
            &cancel,
        )
        .await
        .unwrap();

    assert_eq!(affected, vec![1, 0]);
    assert_eq!(
        store.load_raw("things", "a", &cancel).await.unwrap(),
        Some(json!({ "v": 1 }))
    );
}
