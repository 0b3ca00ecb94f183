use crate::id::NumericId;
use crate::key::UrlKey;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A url mapping, as stored in the store and projected into the cache.
///
/// Documents are immutable: `key` is always the encoding of `numeric_id`, and
/// `expire_at` carries a far-future sentinel instead of being absent when the
/// mapping never expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlDocument {
    #[serde(rename = "base10Id")]
    pub numeric_id: NumericId,
    #[serde(rename = "urlKey")]
    pub key: UrlKey,
    #[serde(rename = "longUrl")]
    pub target_url: String,
    #[serde(rename = "expireTime")]
    pub expire_at: Timestamp,
    #[serde(rename = "liveForever")]
    pub never_expires: bool,
}

impl UrlDocument {
    /// Builds a document, deriving its key from `numeric_id`.
    pub fn new(
        numeric_id: NumericId,
        target_url: impl Into<String>,
        expire_at: Timestamp,
        never_expires: bool,
    ) -> Self {
        Self {
            numeric_id,
            key: UrlKey::from(numeric_id),
            target_url: target_url.into(),
            expire_at,
            never_expires,
        }
    }

    /// Whether the mapping has logically expired at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        !self.never_expires && now >= self.expire_at
    }

    /// Serializes the document into the flat json form kept in the cache.
    pub fn to_cache_value(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_cache_value(value: &str) -> serde_json::Result<Self> {
        serde_json::from_str(value)
    }
}
