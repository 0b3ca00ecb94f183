use crate::document::UrlDocument;
use crate::error::ServiceError;
use crate::key::UrlKey;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ServiceError>;

/// The contract the transport layer consumes.
#[async_trait]
pub trait TinyUrlService: Send + Sync + 'static {
    /// Shortens `target_url` and returns the persisted document.
    async fn generate_tiny_url(&self, target_url: &str, live_forever: bool)
        -> Result<UrlDocument>;

    /// Resolves a key to its document.
    /// Returns `Err(NotFound)` if the key does not exist or has expired.
    async fn get_tiny_url(&self, key: &UrlKey) -> Result<UrlDocument>;

    /// Deletes the mapping for `key`.
    /// Returns `Err(NotFound)` if the store has no such key.
    async fn delete_tiny_url(&self, key: &UrlKey) -> Result<()>;

    /// Registers the per-key usage counter with the metrics sink, once.
    fn register_metric(&self) -> Result<()>;
}
