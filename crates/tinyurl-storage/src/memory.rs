use crate::reaper::ExpiryReaper;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use tinyurl_core::store::Result;
use tinyurl_core::{Store, StoreError, UrlDocument, UrlKey};
use tracing::trace;

/// In-memory implementation of the [`Store`] trait, sharded with DashMap.
///
/// Documents are kept until deleted or purged, so expired entries are still
/// returned by `get_document`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: DashMap<UrlKey, UrlDocument>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored documents, expired or not.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn put(&self, document: &UrlDocument) -> Result<()> {
        trace!(key = %document.key, "inserting document");

        // Check-and-insert under the shard lock: an existing key is a conflict.
        match self.storage.entry(document.key.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(document.key.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(document.clone());
                Ok(())
            }
        }
    }

    async fn get_document(&self, key: &UrlKey) -> Result<UrlDocument> {
        self.storage
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &UrlKey) -> Result<()> {
        self.storage
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}

#[async_trait]
impl ExpiryReaper for InMemoryStore {
    async fn purge_expired(&self, now: Timestamp) -> Result<u64> {
        let mut purged = 0;
        self.storage.retain(|_, doc| {
            let expired = doc.is_expired_at(now);
            purged += u64::from(expired);
            !expired
        });
        Ok(purged)
    }
}
