use async_trait::async_trait;
use moka::future::Cache as MokaStore;
use moka::Expiry;
use std::time::{Duration, Instant};
use tinyurl_core::cache::Result;
use tinyurl_core::{Cache, CacheError, UrlKey};
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// An entry together with the ttl it was written with.
#[derive(Debug, Clone)]
struct CachedValue {
    payload: String,
    ttl: Duration,
}

/// Expires each entry after its own ttl, counted from the last write.
struct PerEntryTtl;

impl Expiry<UrlKey, CachedValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &UrlKey,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &UrlKey,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// An in-process cache backed by Moka.
///
/// Suited to single-node deployments. Capacity is bounded; entries may be
/// evicted before their ttl elapses, which the resolver treats as a miss.
#[derive(Debug, Clone)]
pub struct MokaCache {
    cache: MokaStore<UrlKey, CachedValue>,
}

impl MokaCache {
    /// Creates a cache holding at most 10,000 entries.
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        MokaCacheConfig::builder()
            .max_capacity(max_capacity)
            .build()
            .into()
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> MokaCacheConfigBuilder {
        MokaCacheConfig::builder()
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for MokaCache {
    async fn cache(&self, key: &UrlKey, value: &str, ttl: Duration) -> Result<()> {
        trace!(%key, ?ttl, "storing value in moka cache");

        let entry = CachedValue {
            payload: value.to_string(),
            ttl,
        };
        self.cache.insert(key.clone(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &UrlKey) -> Result<()> {
        match self.cache.remove(key).await {
            Some(_) => {
                debug!(%key, "removed value from moka cache");
                Ok(())
            }
            None => Err(CacheError::NotFound(key.to_string())),
        }
    }

    async fn get_cached_value(&self, key: &UrlKey) -> Result<Option<String>> {
        match self.cache.get(key).await {
            Some(entry) => {
                trace!(%key, "cache hit in moka");
                Ok(Some(entry.payload))
            }
            None => {
                trace!(%key, "cache miss in moka");
                Ok(None)
            }
        }
    }
}

/// Configuration for creating a [`MokaCache`].
#[derive(Debug, TypedBuilder)]
pub struct MokaCacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default = 10_000)]
    max_capacity: u64,
    /// Evicts entries that go unread for this long, on top of their ttl.
    #[builder(default, setter(strip_option))]
    time_to_idle: Option<Duration>,
}

impl From<MokaCacheConfig> for MokaCache {
    fn from(config: MokaCacheConfig) -> Self {
        let mut builder = MokaStore::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl);

        if let Some(tti) = config.time_to_idle {
            builder = builder.time_to_idle(tti);
        }

        MokaCache {
            cache: builder.build(),
        }
    }
}
