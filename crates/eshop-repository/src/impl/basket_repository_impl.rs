//! `BasketRepositoryImpl`: baskets stored as documents.

use crate::{BasketRepository, DocumentSession, DocumentStore};
use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopError, EshopResult, ShoppingCart};
use std::sync::Arc;
use tracing::debug;

/// Basket repository over a [`DocumentStore`], with no caching.
///
/// Each call opens its own session; writes are committed with a single
/// `save_changes`.
pub struct BasketRepositoryImpl {
    store: Arc<dyn DocumentStore>,
}

impl BasketRepositoryImpl {
    /// Creates a repository over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn session(&self) -> DocumentSession {
        DocumentSession::open(Arc::clone(&self.store))
    }
}

#[async_trait]
impl BasketRepository for BasketRepositoryImpl {
    async fn get_basket(&self, user_name: &str, cancel: &CancellationToken) -> EshopResult<ShoppingCart> {
        debug!("Repository: get_basket {}", user_name);
        self.session()
            .load::<ShoppingCart>(user_name, cancel)
            .await?
            .ok_or_else(|| EshopError::not_found("Basket", user_name))
    }

    async fn store_basket(&self, cart: ShoppingCart, cancel: &CancellationToken) -> EshopResult<ShoppingCart> {
        debug!("Repository: store_basket {}", cart.user_name);
        let mut session = self.session();
        session.store(&cart)?;
        session.save_changes(cancel).await?;
        Ok(cart)
    }

    async fn delete_basket(&self, user_name: &str, cancel: &CancellationToken) -> EshopResult<bool> {
        debug!("Repository: delete_basket {}", user_name);
        let mut session = self.session();
        session.delete::<ShoppingCart>(user_name);
        let affected = session.save_changes(cancel).await?;
        Ok(affected.first().is_some_and(|&count| count > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryDocumentStore;
    use eshop_core::CartItem;
    use rust_decimal::Decimal;

    fn repository() -> BasketRepositoryImpl {
        BasketRepositoryImpl::new(Arc::new(InMemoryDocumentStore::new()))
    }

    fn cart(user: &str, quantity: u32) -> ShoppingCart {
        ShoppingCart::new(user).with_items(vec![CartItem::new("p1", "Pen", quantity, Decimal::new(999, 2))])
    }

    #[tokio::test]
    async fn test_get_missing_basket_is_not_found() {
        let err = repository()
            .get_basket("ghost", &CancellationToken::none())
            .await
            .unwrap_err();

        assert!(matches!(err, EshopError::NotFound { resource_type: "Basket", ref key } if key == "ghost"));
    }

    #[tokio::test]
    async fn test_store_is_upsert() {
        let repo = repository();
        let cancel = CancellationToken::none();

        repo.store_basket(cart("alice", 1), &cancel).await.unwrap();
        let stored = repo.store_basket(cart("alice", 3), &cancel).await.unwrap();
        assert_eq!(stored, cart("alice", 3));

        let loaded = repo.get_basket("alice", &cancel).await.unwrap();
        assert_eq!(loaded.items[0].quantity, 3);
        assert_eq!(loaded.total_price(), Some(Decimal::new(2997, 2)));
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = repository();
        let cancel = CancellationToken::none();

        repo.store_basket(cart("bob", 1), &cancel).await.unwrap();

        assert!(repo.delete_basket("bob", &cancel).await.unwrap());
        assert!(!repo.delete_basket("bob", &cancel).await.unwrap());
        assert!(repo.get_basket("bob", &cancel).await.is_err());
    }
}
