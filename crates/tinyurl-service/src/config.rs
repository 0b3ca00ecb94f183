use jiff::SignedDuration;
use std::time::Duration;
use typed_builder::TypedBuilder;

const DAY: i64 = 24 * 60 * 60;

/// Tunables of the tiny url service.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ServiceConfig {
    /// How long a regular mapping lives.
    #[builder(default = SignedDuration::from_secs(365 * DAY))]
    pub default_lifetime: SignedDuration,

    /// The far-future lifetime given to mappings created with `live_forever`.
    #[builder(default = SignedDuration::from_secs(250 * 365 * DAY))]
    pub forever_lifetime: SignedDuration,

    /// TTL of cache entries, independent of the document's own expiry.
    #[builder(default = Duration::from_secs(DAY as u64))]
    pub cache_ttl: Duration,

    /// How many fresh keys `generate` tries before giving up on conflicts.
    #[builder(default = 3)]
    pub max_generate_attempts: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
