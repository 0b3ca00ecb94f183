use async_trait::async_trait;
use jiff::Timestamp;
use std::sync::Arc;
use tinyurl_core::StoreError;

/// Removes documents whose expiry has passed from a store.
///
/// Resolution already refuses expired documents; reaping only reclaims space.
/// Documents marked as never expiring are never reaped.
#[async_trait]
pub trait ExpiryReaper: Send + Sync + 'static {
    /// Deletes every expiring document with `expire_at <= now` and returns how
    /// many were removed.
    async fn purge_expired(&self, now: Timestamp) -> Result<u64, StoreError>;
}

#[async_trait]
impl<T: ExpiryReaper + ?Sized> ExpiryReaper for Arc<T> {
    async fn purge_expired(&self, now: Timestamp) -> Result<u64, StoreError> {
        (**self).purge_expired(now).await
    }
}
