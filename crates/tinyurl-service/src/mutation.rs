use crate::config::ServiceConfig;
use crate::projection;
use crate::Result;
use std::sync::Arc;
use tinyurl_core::{
    validate_target_url, Cache, Clock, ServiceError, Store, StoreError, UrlDocument, UrlKey,
    UsageCounter,
};
use tinyurl_generator::Generator;
use tracing::{debug, error, info, warn};

/// Write path of the service: creates and deletes mappings.
///
/// The store is written first and is the only step that can fail an
/// operation. Cache and usage updates that follow are best-effort.
pub struct MutationService<S, C, G, U> {
    store: Arc<S>,
    cache: Arc<C>,
    generator: Arc<G>,
    usage: Arc<U>,
    clock: Arc<dyn Clock>,
    config: Arc<ServiceConfig>,
}

impl<S, C, G, U> Clone for MutationService<S, C, G, U> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            generator: Arc::clone(&self.generator),
            usage: Arc::clone(&self.usage),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S, C, G, U> MutationService<S, C, G, U>
where
    S: Store,
    C: Cache,
    G: Generator,
    U: UsageCounter,
{
    pub fn new(
        store: Arc<S>,
        cache: Arc<C>,
        generator: Arc<G>,
        usage: Arc<U>,
        clock: Arc<dyn Clock>,
        config: Arc<ServiceConfig>,
    ) -> Self {
        Self {
            store,
            cache,
            generator,
            usage,
            clock,
            config,
        }
    }

    /// Creates a mapping for `target_url` under a freshly generated key.
    ///
    /// A key that is already taken in the store is replaced by a new one, up to
    /// the configured number of attempts.
    pub async fn generate(&self, target_url: &str, never_expires: bool) -> Result<UrlDocument> {
        validate_target_url(target_url)?;

        let lifetime = if never_expires {
            self.config.forever_lifetime
        } else {
            self.config.default_lifetime
        };
        let expire_at = self
            .clock
            .now()
            .checked_add(lifetime)
            .map_err(|e| ServiceError::Internal(format!("expiry out of range: {e}")))?;
        let max_attempts = self.config.max_generate_attempts.max(1);
        let mut attempt = 1;

        loop {
            let document = UrlDocument::new(
                self.generator.generate(),
                target_url,
                expire_at,
                never_expires,
            );
            let key = &document.key;

            match self.store.put(&document).await {
                Ok(()) => {
                    info!(%key, never_expires, "created tiny url");
                    projection::populate(self.cache.as_ref(), &document, self.config.cache_ttl)
                        .await;
                    return Ok(document);
                }
                Err(StoreError::Conflict(_)) if attempt < max_attempts => {
                    warn!(%key, attempt, "generated key is taken, retrying");
                    attempt += 1;
                }
                Err(e) => {
                    error!(%key, attempt, error = %e, "failed to store document");
                    return Err(ServiceError::StorageFailure(e));
                }
            }
        }
    }

    /// Deletes the mapping for `key`, then drops its cache entry and usage count.
    pub async fn delete(&self, key: &UrlKey) -> Result<()> {
        match self.store.delete(key).await {
            Ok(()) => debug!(%key, "deleted document from store"),
            Err(StoreError::NotFound(_)) => {
                debug!(%key, "nothing to delete");
                return Err(ServiceError::NotFound(key.to_string()));
            }
            Err(e) => {
                error!(%key, error = %e, "failed to delete document from store");
                return Err(ServiceError::StorageFailure(e));
            }
        }

        projection::evict(self.cache.as_ref(), key).await;
        self.usage.reset(key);
        info!(%key, "deleted tiny url");
        Ok(())
    }
}
