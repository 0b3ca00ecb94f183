use std::time::Duration;
use tinyurl_core::{Cache, CacheError, ServiceError, UrlDocument};
use tracing::{debug, warn};

/// Writes `document` into the cache. Failures are logged and swallowed.
pub(crate) async fn populate<C: Cache>(cache: &C, document: &UrlDocument, ttl: Duration) {
    let key = &document.key;

    let value = match document.to_cache_value() {
        Ok(value) => value,
        Err(e) => {
            let err = ServiceError::from(CacheError::Serialization(e.to_string()));
            warn!(%key, error = %err, "failed to serialize document for caching");
            return;
        }
    };

    match cache.cache(key, &value, ttl).await {
        Ok(()) => debug!(%key, "cached document"),
        Err(e) => {
            let err = ServiceError::from(e);
            warn!(%key, error = %err, "failed to cache document");
        }
    }
}

/// Removes `key` from the cache. An absent entry is not an error.
pub(crate) async fn evict<C: Cache>(cache: &C, key: &tinyurl_core::UrlKey) {
    match cache.delete(key).await {
        Ok(()) => debug!(%key, "evicted cache entry"),
        Err(CacheError::NotFound(_)) => debug!(%key, "no cache entry to evict"),
        Err(e) => {
            let err = ServiceError::from(e);
            warn!(%key, error = %err, "failed to evict cache entry");
        }
    }
}
