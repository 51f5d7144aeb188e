//! Documents - typed records stored in named collections.
//!
//! Every collection the read side touches (carts, listings, inventories,
//! blueprints, brands, companies) is a document collection. Stores hand out
//! raw `serde_json::Value`s so record shapes that drifted over time can still
//! be canonicalised and decoded.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_views::{Document, DocumentsExt, InMemoryDocumentStore};
//!
//! #[derive(Serialize, Deserialize, Clone, Document)]
//! #[document(collection = "brands")]
//! struct Brand {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! let store = InMemoryDocumentStore::new();
//! store.upsert(&brand)?;
//! let loaded = store.documents::<Brand>().get_many(&ids).await?;
//! ```

mod aliases;
mod in_memory;
mod repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use aliases::{AliasTable, Nested};
pub use in_memory::InMemoryDocumentStore;
pub use repository::{DocumentRepository, DocumentsExt};
pub use store::{BatchStore, PrimaryStore};

/// Trait for types stored as documents in a collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this document type (e.g., "carts", "listings").
    const COLLECTION: &'static str;

    /// Legacy field names this record tolerates, rewritten before decoding.
    const ALIASES: &'static AliasTable = &AliasTable::EMPTY;

    /// Returns the unique identifier for this document.
    fn id(&self) -> &str;

    /// Decode a raw document, tolerating the legacy field names in `ALIASES`.
    fn decode(doc: Value) -> Result<Self, StoreError> {
        serde_json::from_value(Self::ALIASES.canonicalize(doc))
            .map_err(|e| StoreError::Serde(format!("{}: {}", Self::COLLECTION, e)))
    }
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The collection could not be reached at all.
    #[error("collection {collection} unavailable: {message}")]
    Unavailable { collection: String, message: String },
    /// Serialization/deserialization error.
    #[error("document serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("document storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn unavailable(collection: &str, message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            collection: collection.to_string(),
            message: message.into(),
        }
    }
}
