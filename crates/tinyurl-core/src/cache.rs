use crate::error::CacheError;
use crate::key::UrlKey;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, CacheError>;

/// A key/value cache with per-entry TTL, holding serialized url documents.
///
/// The cache is a disposable projection of the store: any entry may vanish at
/// any time without data loss.
#[async_trait]
pub trait Cache: Send + Sync + 'static {
    /// Stores `value` under `key` for at most `ttl`.
    async fn cache(&self, key: &UrlKey, value: &str, ttl: Duration) -> Result<()>;

    /// Removes the entry for `key`.
    /// Returns `Err(NotFound)` if there was no entry.
    async fn delete(&self, key: &UrlKey) -> Result<()>;

    /// Gets the cached value for `key`.
    ///
    /// Returns `Ok(None)` if the key is not in the cache, which callers must
    /// tell apart from a transport error.
    async fn get_cached_value(&self, key: &UrlKey) -> Result<Option<String>>;
}

#[async_trait]
impl<T: Cache + ?Sized> Cache for Arc<T> {
    async fn cache(&self, key: &UrlKey, value: &str, ttl: Duration) -> Result<()> {
        (**self).cache(key, value, ttl).await
    }

    async fn delete(&self, key: &UrlKey) -> Result<()> {
        (**self).delete(key).await
    }

    async fn get_cached_value(&self, key: &UrlKey) -> Result<Option<String>> {
        (**self).get_cached_value(key).await
    }
}
