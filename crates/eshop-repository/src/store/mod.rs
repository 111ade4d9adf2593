//! Document storage: whole aggregates stored as JSON documents keyed by
//! `(collection, id)`.
//!
//! A [`DocumentStore`] only knows raw JSON and applies batches atomically;
//! typed access and batching live in [`DocumentSession`].

mod memory;
mod postgres;
mod session;

pub use memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use session::DocumentSession;

use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult};
use serde_json::Value;

/// A write staged in a session and applied on commit.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingOperation {
    /// Insert or fully replace a document.
    Store {
        collection: &'static str,
        id: String,
        body: Value,
    },
    /// Remove a document if present.
    Delete { collection: &'static str, id: String },
}

impl PendingOperation {
    /// Collection the operation targets.
    #[must_use]
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Store { collection, .. } | Self::Delete { collection, .. } => collection,
        }
    }

    /// Document id the operation targets.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Store { id, .. } | Self::Delete { id, .. } => id,
        }
    }
}

/// Backing store for JSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Loads a document body, or `None` if absent.
    async fn load_raw(
        &self,
        collection: &'static str,
        id: &str,
        cancel: &CancellationToken,
    ) -> EshopResult<Option<Value>>;

    /// Applies every operation as one atomic unit and returns the number of
    /// documents affected by each operation, in order.
    ///
    /// Either all operations take effect or none do, including when the call
    /// is cancelled mid-flight.
    async fn commit(
        &self,
        operations: Vec<PendingOperation>,
        cancel: &CancellationToken,
    ) -> EshopResult<Vec<u64>>;
}
