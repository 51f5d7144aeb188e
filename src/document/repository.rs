//! DocumentRepository - Typed accessor over the raw document stores.

use std::marker::PhantomData;

use super::{BatchStore, Document, PrimaryStore, StoreError};

/// Typed repository wrapper for reading documents of a specific type.
///
/// Decoding goes through `Document::decode`, so legacy field names are
/// tolerated the same way everywhere.
pub struct DocumentRepository<'a, S: ?Sized, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: ?Sized, M: Document> DocumentRepository<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }
}

impl<'a, S: PrimaryStore + ?Sized, M: Document> DocumentRepository<'a, S, M> {
    /// Get a document by ID. A document that exists but cannot be decoded is an error.
    pub async fn get(&self, id: &str) -> Result<Option<M>, StoreError> {
        match self.store.get_by_id(M::COLLECTION, id).await? {
            Some(doc) => M::decode(doc).map(Some),
            None => Ok(None),
        }
    }

    /// All documents of the collection that decode, with their store IDs,
    /// ordered by ID.
    pub async fn all(&self) -> Result<Vec<(String, M)>, StoreError> {
        let docs = self.store.list(M::COLLECTION).await?;
        Ok(docs
            .into_iter()
            .filter_map(|(id, doc)| match M::decode(doc) {
                Ok(decoded) => Some((id, decoded)),
                Err(e) => {
                    tracing::warn!(collection = M::COLLECTION, id = %id, error = %e, "skipping undecodable document");
                    None
                }
            })
            .collect())
    }
}

impl<'a, S: BatchStore + ?Sized, M: Document> DocumentRepository<'a, S, M> {
    /// Fetch many documents in one round trip, aligned with `ids`.
    ///
    /// Missing and undecodable documents are both `None` at their position.
    pub async fn get_many(&self, ids: &[String]) -> Result<Vec<Option<M>>, StoreError> {
        let docs = self.store.multi_get(M::COLLECTION, ids).await?;
        Ok(docs
            .into_iter()
            .zip(ids)
            .map(|(doc, id)| {
                doc.and_then(|doc| match M::decode(doc) {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        tracing::warn!(collection = M::COLLECTION, id = %id, error = %e, "skipping undecodable document");
                        None
                    }
                })
            })
            .collect())
    }
}

/// Extension trait for typed document access on any store.
pub trait DocumentsExt {
    /// Get a typed document repository.
    fn documents<M: Document>(&self) -> DocumentRepository<'_, Self, M> {
        DocumentRepository::new(self)
    }
}

impl<S: ?Sized> DocumentsExt for S {}
