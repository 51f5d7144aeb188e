//! InMemoryDocumentStore - HashMap-backed document store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::{BatchStore, Document, PrimaryStore, StoreError};

/// In-memory document store backed by a HashMap of JSON bytes.
///
/// Storage key is `"collection:id"`. Clone-friendly via Arc. Multi-get calls
/// are counted per collection so callers can check round trips.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    multi_gets: Arc<RwLock<HashMap<String, usize>>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn poisoned() -> StoreError {
        StoreError::Storage("lock poisoned".into())
    }

    /// Insert or replace a typed document.
    pub fn upsert<M: Document>(&self, doc: &M) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(doc).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.upsert_bytes(M::COLLECTION, doc.id(), bytes)
    }

    /// Insert or replace a raw JSON document, whatever its shape.
    pub fn upsert_raw(&self, collection: &str, id: &str, doc: &Value) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(doc).map_err(|e| StoreError::Serde(e.to_string()))?;
        self.upsert_bytes(collection, id, bytes)
    }

    fn upsert_bytes(&self, collection: &str, id: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut storage = self.storage.write().map_err(|_| Self::poisoned())?;
        storage.insert(Self::make_key(collection, id), bytes);
        Ok(())
    }

    /// Delete a document by ID. Returns true if it existed.
    pub fn delete<M: Document>(&self, id: &str) -> Result<bool, StoreError> {
        let mut storage = self.storage.write().map_err(|_| Self::poisoned())?;
        Ok(storage.remove(&Self::make_key(M::COLLECTION, id)).is_some())
    }

    /// Number of `multi_get` calls made against `collection`.
    pub fn multi_get_calls(&self, collection: &str) -> usize {
        self.multi_gets
            .read()
            .map(|calls| calls.get(collection).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn read_raw(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let storage = self.storage.read().map_err(|_| Self::poisoned())?;
        match storage.get(&Self::make_key(collection, id)) {
            Some(bytes) => serde_json::from_slice(bytes)
                .map(Some)
                .map_err(|e| StoreError::Serde(e.to_string())),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PrimaryStore for InMemoryDocumentStore {
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        self.read_raw(collection, id)
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let storage = self.storage.read().map_err(|_| Self::poisoned())?;
        let prefix = format!("{}:", collection);

        let mut entries: Vec<(&str, &Vec<u8>)> = storage
            .iter()
            .filter_map(|(key, bytes)| key.strip_prefix(&prefix).map(|id| (id, bytes)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        entries
            .into_iter()
            .map(|(id, bytes)| {
                serde_json::from_slice(bytes)
                    .map(|doc| (id.to_string(), doc))
                    .map_err(|e| StoreError::Serde(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl BatchStore for InMemoryDocumentStore {
    async fn multi_get(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<Option<Value>>, StoreError> {
        {
            let mut calls = self.multi_gets.write().map_err(|_| Self::poisoned())?;
            *calls.entry(collection.to_string()).or_insert(0) += 1;
        }

        ids.iter().map(|id| self.read_raw(collection, id)).collect()
    }
}
