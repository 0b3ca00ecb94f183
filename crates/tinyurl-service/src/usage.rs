use metrics::{describe_gauge, gauge, Unit};
use std::sync::atomic::{AtomicBool, Ordering};
use tinyurl_core::{UrlKey, UsageCounter, UsageError};
use tracing::debug;

/// Name of the per-key usage series.
pub const TINY_URL_USAGE: &str = "tiny_url_svc_tiny_url_usage";
/// Label carrying the url key.
pub const URL_KEY_LABEL: &str = "url_key";

/// Usage counter reporting to the process-wide `metrics` recorder.
///
/// The series is a gauge: a counter can only move up, and a deleted key has to
/// read zero again. All state lives in the recorder.
#[derive(Debug, Default)]
pub struct MetricsUsageCounter {
    registered: AtomicBool,
}

impl MetricsUsageCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UsageCounter for MetricsUsageCounter {
    fn register(&self) -> Result<(), UsageError> {
        if self.registered.swap(true, Ordering::SeqCst) {
            return Err(UsageError::AlreadyRegistered);
        }

        describe_gauge!(
            TINY_URL_USAGE,
            Unit::Count,
            "number of times each tiny url has been resolved"
        );
        debug!(metric = TINY_URL_USAGE, "registered usage counter");
        Ok(())
    }

    fn increment(&self, key: &UrlKey) {
        gauge!(TINY_URL_USAGE, URL_KEY_LABEL => key.to_string()).increment(1.0);
    }

    fn reset(&self, key: &UrlKey) {
        gauge!(TINY_URL_USAGE, URL_KEY_LABEL => key.to_string()).set(0.0);
    }
}
