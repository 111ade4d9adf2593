//! Unit of work over a [`DocumentStore`].

use super::{DocumentStore, PendingOperation};
use eshop_core::{CancellationToken, Document, EshopResult};
use std::sync::Arc;
use tracing::debug;

/// Typed unit of work. Stores and deletes are staged in memory and reach
/// the backing store only on [`save_changes`](Self::save_changes), as one
/// atomic batch.
pub struct DocumentSession {
    store: Arc<dyn DocumentStore>,
    pending: Vec<PendingOperation>,
}

impl DocumentSession {
    /// Opens a session with nothing staged.
    #[must_use]
    pub fn open(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            pending: Vec::new(),
        }
    }

    /// Loads a committed document by id.
    pub async fn load<T: Document>(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> EshopResult<Option<T>> {
        match self.store.load_raw(T::COLLECTION, id, cancel).await? {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }

    /// Stages an upsert of `document` under its identity.
    pub fn store<T: Document>(&mut self, document: &T) -> EshopResult<()> {
        let body = serde_json::to_value(document)?;
        self.pending.push(PendingOperation::Store {
            collection: T::COLLECTION,
            id: document.identity().to_string(),
            body,
        });
        Ok(())
    }

    /// Stages removal of the document with `id`.
    pub fn delete<T: Document>(&mut self, id: impl Into<String>) {
        self.pending.push(PendingOperation::Delete {
            collection: T::COLLECTION,
            id: id.into(),
        });
    }

    /// Operations staged since the last save.
    #[must_use]
    pub fn pending(&self) -> &[PendingOperation] {
        &self.pending
    }

    /// Commits every staged operation atomically and returns the affected
    /// document count per operation. The staged list is cleared whether or
    /// not the commit succeeds.
    pub async fn save_changes(&mut self, cancel: &CancellationToken) -> EshopResult<Vec<u64>> {
        let operations = std::mem::take(&mut self.pending);
        if operations.is_empty() {
            return Ok(Vec::new());
        }

        debug!(operations = operations.len(), "Committing document session");
        self.store.commit(operations, cancel).await
    }
}
