use crate::config::ServiceConfig;
use crate::projection;
use crate::Result;
use std::sync::Arc;
use tinyurl_core::{
    Cache, CacheError, Clock, ServiceError, Store, StoreError, UrlDocument, UrlKey, UsageCounter,
};
use tracing::{debug, error, trace, warn};

/// Outcome of the cache lookup that starts a resolution.
enum Lookup {
    Hit(UrlDocument),
    /// The cache answered and has no entry, so the store result may be cached.
    Miss,
    /// The cache could not answer; the store result is served but not cached.
    Degraded,
}

/// Read path of the service.
///
/// Looks a key up in the cache first and falls back to the store, caching the
/// store's answer only when the cache reported a genuine miss.
pub struct CacheAsideResolver<S, C, U> {
    store: Arc<S>,
    cache: Arc<C>,
    usage: Arc<U>,
    clock: Arc<dyn Clock>,
    config: Arc<ServiceConfig>,
}

impl<S, C, U> Clone for CacheAsideResolver<S, C, U> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            usage: Arc::clone(&self.usage),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Store, C: Cache, U: UsageCounter> CacheAsideResolver<S, C, U> {
    pub fn new(
        store: Arc<S>,
        cache: Arc<C>,
        usage: Arc<U>,
        clock: Arc<dyn Clock>,
        config: Arc<ServiceConfig>,
    ) -> Self {
        Self {
            store,
            cache,
            usage,
            clock,
            config,
        }
    }

    /// Resolves `key` to its document.
    ///
    /// Returns `NotFound` when the store has no such key or the document has
    /// expired. Cache failures never fail the read.
    pub async fn resolve(&self, key: &UrlKey) -> Result<UrlDocument> {
        self.usage.increment(key);

        let repopulate = match self.lookup(key).await {
            Lookup::Hit(document) => return self.serve_cached(document).await,
            Lookup::Miss => true,
            Lookup::Degraded => false,
        };

        let document = match self.store.get_document(key).await {
            Ok(document) => document,
            Err(StoreError::NotFound(_)) => {
                debug!(%key, "key not found in store");
                return Err(ServiceError::NotFound(key.to_string()));
            }
            Err(e) => {
                error!(%key, error = %e, "failed to read document from store");
                return Err(ServiceError::StorageFailure(e));
            }
        };

        if document.is_expired_at(self.clock.now()) {
            debug!(%key, expire_at = %document.expire_at, "stored document has expired");
            return Err(ServiceError::NotFound(key.to_string()));
        }

        if repopulate {
            projection::populate(self.cache.as_ref(), &document, self.config.cache_ttl).await;
        }
        Ok(document)
    }

    async fn lookup(&self, key: &UrlKey) -> Lookup {
        trace!(%key, "looking up cache");

        let value = match self.cache.get_cached_value(key).await {
            Ok(Some(value)) => value,
            Ok(None) | Err(CacheError::NotFound(_)) => {
                debug!(%key, "cache miss");
                return Lookup::Miss;
            }
            Err(e) => {
                let err = ServiceError::from(e);
                warn!(%key, error = %err, "cache lookup failed, reading from store");
                return Lookup::Degraded;
            }
        };

        match UrlDocument::from_cache_value(&value) {
            Ok(document) if document.key == *key => {
                debug!(%key, "cache hit");
                Lookup::Hit(document)
            }
            Ok(document) => {
                let err = ServiceError::from(CacheError::InvalidData(format!(
                    "entry holds key '{}'",
                    document.key
                )));
                warn!(%key, error = %err, "cached document belongs to another key");
                Lookup::Degraded
            }
            Err(e) => {
                let err = ServiceError::from(CacheError::InvalidData(e.to_string()));
                warn!(%key, error = %err, "cached value is not a document");
                Lookup::Degraded
            }
        }
    }

    async fn serve_cached(&self, document: UrlDocument) -> Result<UrlDocument> {
        if !document.is_expired_at(self.clock.now()) {
            return Ok(document);
        }

        let key = &document.key;
        debug!(%key, expire_at = %document.expire_at, "cached document has expired");
        projection::evict(self.cache.as_ref(), key).await;
        Err(ServiceError::NotFound(key.to_string()))
    }
}
