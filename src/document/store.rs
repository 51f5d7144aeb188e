//! Store traits the read side is built against.

use async_trait::async_trait;
use serde_json::Value;

use super::StoreError;

/// Point reads of the record a query starts from.
#[async_trait]
pub trait PrimaryStore: Send + Sync {
    /// Get a document by ID. Returns None if not found.
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// All documents of a collection with their IDs, ordered by ID.
    ///
    /// The ID is the store key; a document body need not repeat it.
    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError>;
}

/// Multi-record reads of secondary collections.
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// Fetch many documents in one round trip.
    ///
    /// The result is aligned positionally with `ids`; a missing document is
    /// `None` at its position, never an error.
    async fn multi_get(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<Option<Value>>, StoreError>;
}
