//! Marker for aggregates persisted as documents.

use serde::{de::DeserializeOwned, Serialize};

/// An aggregate stored as a single JSON document, addressed by a string
/// identity inside a named collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Collection (document type) name.
    const COLLECTION: &'static str;

    /// Returns the document identity.
    fn identity(&self) -> &str;
}
