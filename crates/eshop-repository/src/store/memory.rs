//! In-memory document store.

use super::{DocumentStore, PendingOperation};
use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Process-local [`DocumentStore`] for tests and single-node runs.
///
/// A batch is applied under one write lock, so readers never observe a
/// partially applied commit.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<(&'static str, String), Value>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    #[must_use]
    pub fn count(&self, collection: &str) -> usize {
        self.documents
            .read()
            .keys()
            .filter(|(c, _)| *c == collection)
            .count()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn load_raw(
        &self,
        collection: &'static str,
        id: &str,
        cancel: &CancellationToken,
    ) -> EshopResult<Option<Value>> {
        cancel.ensure_active()?;
        Ok(self
            .documents
            .read()
            .get(&(collection, id.to_string()))
            .cloned())
    }

    async fn commit(
        &self,
        operations: Vec<PendingOperation>,
        cancel: &CancellationToken,
    ) -> EshopResult<Vec<u64>> {
        cancel.ensure_active()?;

        let mut documents = self.documents.write();
        let affected = operations
            .into_iter()
            .map(|operation| match operation {
                PendingOperation::Store { collection, id, body } => {
                    documents.insert((collection, id), body);
                    1
                }
                PendingOperation::Delete { collection, id } => {
                    u64::from(documents.remove(&(collection, id)).is_some())
                }
            })
            .collect();

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eshop_core::{CancellationSource, EshopError};
    use serde_json::json;

    fn store_op(id: &str, body: Value) -> PendingOperation {
        PendingOperation::Store {
            collection: "things",
            id: id.to_string(),
            body,
        }
    }

    #[tokio::test]
    async fn test_store_replaces_whole_document() {
        let store = InMemoryDocumentStore::new();
        let cancel = CancellationToken::none();

        store.commit(vec![store_op("a", json!({"v": 1, "extra": true}))], &cancel).await.unwrap();
        store.commit(vec![store_op("a", json!({"v": 2}))], &cancel).await.unwrap();

        let body = store.load_raw("things", "a", &cancel).await.unwrap();
        assert_eq!(body, Some(json!({"v": 2})));
        assert_eq!(store.count("things"), 1);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        let cancel = CancellationToken::none();

        store.commit(vec![store_op("a", json!(1))], &cancel).await.unwrap();

        assert!(store.load_raw("others", "a", &cancel).await.unwrap().is_none());
        assert_eq!(store.count("others"), 0);
    }

    #[tokio::test]
    async fn test_cancelled_commit_applies_nothing() {
        let store = InMemoryDocumentStore::new();
        let source = CancellationSource::new();
        source.cancel();

        let result = store.commit(vec![store_op("a", json!(1))], &source.token()).await;

        assert!(matches!(result, Err(EshopError::Cancelled)));
        assert_eq!(store.count("things"), 0);
    }
}
