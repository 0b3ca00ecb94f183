use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::Duration;
use tinyurl_core::cache::Result;
use tinyurl_core::{Cache, CacheError, UrlKey};
use tracing::{debug, trace, warn};

/// A Redis-backed implementation of [`Cache`].
///
/// Values are stored as plain strings under `{prefix}{key}` with a native
/// redis expiry, so several services can share one database.
#[derive(Debug, Clone)]
pub struct RedisCache {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> CacheError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        CacheError::Timeout(message)
    } else if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        CacheError::Unavailable(message)
    } else {
        CacheError::Operation(message)
    }
}

/// `SET EX` takes whole seconds and rejects zero, so partial seconds round up.
fn expiry_seconds(ttl: Duration) -> u64 {
    (ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0)).max(1)
}

impl RedisCache {
    /// Creates a cache using the default `tinyurl:` key prefix.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, "tinyurl:")
    }

    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a client for `redis_url` and connects to it.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| map_redis_error("invalid redis url", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to redis", e))?;
        Ok(Self::new(conn))
    }

    fn cache_key(&self, key: &UrlKey) -> String {
        format!("{}{}", self.key_prefix, key.as_str())
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn cache(&self, key: &UrlKey, value: &str, ttl: Duration) -> Result<()> {
        let cache_key = self.cache_key(key);
        let seconds = expiry_seconds(ttl);
        trace!(%key, seconds, "storing value in redis cache");

        let mut conn = self.conn.clone();
        match conn.set_ex::<_, _, ()>(&cache_key, value, seconds).await {
            Ok(()) => {
                debug!(%key, "cached value in redis");
                Ok(())
            }
            Err(e) => {
                warn!(%key, error = %e, "failed to cache value in redis");
                Err(map_redis_error("failed to write value to redis", e))
            }
        }
    }

    async fn delete(&self, key: &UrlKey) -> Result<()> {
        let cache_key = self.cache_key(key);

        let mut conn = self.conn.clone();
        match conn.del::<_, usize>(&cache_key).await {
            Ok(0) => Err(CacheError::NotFound(key.to_string())),
            Ok(_) => {
                debug!(%key, "removed value from redis cache");
                Ok(())
            }
            Err(e) => {
                warn!(%key, error = %e, "failed to remove value from redis cache");
                Err(map_redis_error("failed to delete value from redis", e))
            }
        }
    }

    async fn get_cached_value(&self, key: &UrlKey) -> Result<Option<String>> {
        let cache_key = self.cache_key(key);

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&cache_key).await {
            Ok(value) => {
                trace!(%key, hit = value.is_some(), "looked up redis cache");
                Ok(value)
            }
            Err(e) => {
                warn!(%key, error = %e, "redis error on get");
                Err(map_redis_error("failed to fetch value from redis", e))
            }
        }
    }
}
