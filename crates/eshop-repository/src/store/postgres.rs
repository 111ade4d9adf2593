//! `PostgreSQL` document store: one JSONB row per document.

use super::{DocumentStore, PendingOperation};
use crate::DatabasePool;
use async_trait::async_trait;
use eshop_core::{CancellationToken, EshopResult};
use serde_json::Value;
use sqlx::types::Json;
use std::sync::Arc;
use tracing::debug;

/// [`DocumentStore`] over the `mt_documents` table.
///
/// Each commit runs in a single transaction. When cancellation fires the
/// in-flight future is dropped and the uncommitted transaction rolls back.
pub struct PostgresDocumentStore {
    pool: Arc<DatabasePool>,
}

impl PostgresDocumentStore {
    /// Creates a store over the given pool.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn load_raw(
        &self,
        collection: &'static str,
        id: &str,
        cancel: &CancellationToken,
    ) -> EshopResult<Option<Value>> {
        cancel
            .run(async {
                let row: Option<(Json<Value>,)> =
                    sqlx::query_as("SELECT data FROM mt_documents WHERE collection = $1 AND id = $2")
                        .bind(collection)
                        .bind(id)
                        .fetch_optional(self.pool.inner())
                        .await?;
                Ok(row.map(|(Json(body),)| body))
            })
            .await
    }

    async fn commit(
        &self,
        operations: Vec<PendingOperation>,
        cancel: &CancellationToken,
    ) -> EshopResult<Vec<u64>> {
        cancel
            .run(async {
                let mut tx = self.pool.inner().begin().await?;
                let mut affected = Vec::with_capacity(operations.len());

                for operation in &operations {
                    let result = match operation {
                        PendingOperation::Store { collection, id, body } => {
                            sqlx::query(
                                r"
                                INSERT INTO mt_documents (collection, id, data, last_modified)
                                VALUES ($1, $2, $3, NOW())
                                ON CONFLICT (collection, id)
                                DO UPDATE SET data = EXCLUDED.data, last_modified = NOW()
                                ",
                            )
                            .bind(*collection)
                            .bind(id)
                            .bind(Json(body))
                            .execute(&mut *tx)
                            .await?
                        }
                        PendingOperation::Delete { collection, id } => {
                            sqlx::query("DELETE FROM mt_documents WHERE collection = $1 AND id = $2")
                                .bind(*collection)
                                .bind(id)
                                .execute(&mut *tx)
                                .await?
                        }
                    };
                    affected.push(result.rows_affected());
                }

                tx.commit().await?;
                debug!(operations = operations.len(), "Document batch committed");
                Ok(affected)
            })
            .await
    }
}
