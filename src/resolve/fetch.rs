//! Batched fetching - one multi-get per referenced collection.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::document::{BatchStore, Document};

/// Run `fut`, giving up after `timeout`. `None` on timeout.
pub(crate) async fn within<F: Future>(timeout: Option<Duration>, fut: F) -> Option<F::Output> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await.ok(),
        None => Some(fut.await),
    }
}

/// Documents fetched for a list of IDs, aligned by position.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    collection: String,
    ids: Vec<String>,
    docs: Vec<Option<Value>>,
}

impl Batch {
    pub fn new(collection: &str, ids: Vec<String>, docs: Vec<Option<Value>>) -> Self {
        Self {
            collection: collection.to_string(),
            ids,
            docs,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Present documents with the ID they were requested under.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ids
            .iter()
            .zip(&self.docs)
            .filter_map(|(id, doc)| doc.as_ref().map(|doc| (id.as_str(), doc)))
    }

    /// Present documents decoded as `M`. A record that fails to decode is
    /// skipped on its own; the rest of the batch is unaffected.
    pub fn decoded<'a, M: Document + 'a>(&'a self) -> impl Iterator<Item = (&'a str, M)> + 'a {
        self.present().filter_map(|(id, doc)| match M::decode(doc.clone()) {
            Ok(decoded) => Some((id, decoded)),
            Err(e) => {
                tracing::warn!(collection = %self.collection, id = %id, error = %e, "skipping undecodable record");
                None
            }
        })
    }
}

/// Issues exactly one multi-get per call, degrading failures to `None`.
#[derive(Clone, Copy)]
pub struct BatchFetcher<'a> {
    store: &'a dyn BatchStore,
    timeout: Option<Duration>,
}

impl<'a> BatchFetcher<'a> {
    pub fn new(store: &'a dyn BatchStore, timeout: Option<Duration>) -> Self {
        Self { store, timeout }
    }

    /// Fetch `ids` from `collection` in a single round trip.
    ///
    /// `None` means the whole collection is unavailable for this request
    /// (store error, timeout, or a misaligned answer); it is logged and the
    /// caller treats every lookup into it as unresolved. An empty ID list
    /// does not touch the store.
    pub async fn fetch(&self, collection: &str, ids: &[String]) -> Option<Batch> {
        if ids.is_empty() {
            return Some(Batch::new(collection, Vec::new(), Vec::new()));
        }

        match within(self.timeout, self.store.multi_get(collection, ids)).await {
            Some(Ok(docs)) if docs.len() == ids.len() => {
                Some(Batch::new(collection, ids.to_vec(), docs))
            }
            Some(Ok(docs)) => {
                tracing::warn!(
                    collection,
                    requested = ids.len(),
                    returned = docs.len(),
                    "batched fetch returned misaligned results; degrading"
                );
                None
            }
            Some(Err(e)) => {
                tracing::warn!(collection, error = %e, "batched fetch failed; degrading");
                None
            }
            None => {
                tracing::warn!(collection, timeout = ?self.timeout, "batched fetch timed out; degrading");
                None
            }
        }
    }

    /// Fetch `M::COLLECTION`.
    pub async fn fetch_for<M: Document>(&self, ids: &[String]) -> Option<Batch> {
        self.fetch(M::COLLECTION, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StoreError;
    use crate::records::Listing;
    use crate::InMemoryDocumentStore;
    use async_trait::async_trait;
    use serde_json::json;

    struct Broken;

    #[async_trait]
    impl BatchStore for Broken {
        async fn multi_get(
            &self,
            collection: &str,
            _ids: &[String],
        ) -> Result<Vec<Option<Value>>, StoreError> {
            Err(StoreError::unavailable(collection, "connection refused"))
        }
    }

    struct ShortAnswer;

    #[async_trait]
    impl BatchStore for ShortAnswer {
        async fn multi_get(
            &self,
            _collection: &str,
            _ids: &[String],
        ) -> Result<Vec<Option<Value>>, StoreError> {
            Ok(vec![None])
        }
    }

    struct Slow;

    #[async_trait]
    impl BatchStore for Slow {
        async fn multi_get(
            &self,
            _collection: &str,
            ids: &[String],
        ) -> Result<Vec<Option<Value>>, StoreError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![None; ids.len()])
        }
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn one_round_trip_aligned_with_ids() {
        let store = InMemoryDocumentStore::new();
        store
            .upsert_raw("listings", "L2", &json!({ "title": "Cap" }))
            .unwrap();
        let fetcher = BatchFetcher::new(&store, None);

        let batch = fetcher.fetch("listings", &ids(&["L1", "L2"])).await.unwrap();

        assert_eq!(store.multi_get_calls("listings"), 1);
        assert_eq!(batch.len(), 2);
        let present: Vec<(&str, &Value)> = batch.present().collect();
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].0, "L2");
        assert_eq!(present[0].1["title"], "Cap");
    }

    #[tokio::test]
    async fn empty_ids_skip_the_store() {
        let store = InMemoryDocumentStore::new();
        let fetcher = BatchFetcher::new(&store, None);

        let batch = fetcher.fetch("listings", &[]).await.unwrap();
        assert!(batch.is_empty());
        assert_eq!(store.multi_get_calls("listings"), 0);
    }

    #[tokio::test]
    async fn failure_degrades_to_none() {
        let fetcher = BatchFetcher::new(&Broken, None);
        assert!(fetcher.fetch("listings", &ids(&["L1"])).await.is_none());
    }

    #[tokio::test]
    async fn misaligned_answer_degrades_to_none() {
        let fetcher = BatchFetcher::new(&ShortAnswer, None);
        assert!(fetcher.fetch("listings", &ids(&["L1", "L2"])).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_degrades_to_none() {
        let fetcher = BatchFetcher::new(&Slow, Some(Duration::from_millis(100)));
        assert!(fetcher.fetch("listings", &ids(&["L1"])).await.is_none());
    }

    #[tokio::test]
    async fn undecodable_record_skipped_alone() {
        let store = InMemoryDocumentStore::new();
        store
            .upsert_raw("listings", "L1", &json!({ "title": 42 }))
            .unwrap();
        store
            .upsert_raw("listings", "L2", &json!({ "Title": "Cap" }))
            .unwrap();
        let fetcher = BatchFetcher::new(&store, None);

        let batch = fetcher.fetch_for::<Listing>(&ids(&["L1", "L2"])).await.unwrap();
        let decoded: Vec<(&str, Listing)> = batch.decoded::<Listing>().collect();

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].0, "L2");
        assert_eq!(decoded[0].1.title, "Cap");
    }
}
