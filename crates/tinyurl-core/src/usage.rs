use crate::error::UsageError;
use crate::key::UrlKey;
use std::sync::Arc;

/// A per-key usage counter owned by the process-wide metrics registry.
///
/// `increment` and `reset` are fire-and-forget: they never block and never
/// fail, so a broken metrics sink cannot affect resolution or deletion.
pub trait UsageCounter: Send + Sync + 'static {
    /// Registers the counter with the metrics sink. Only the first call succeeds.
    fn register(&self) -> Result<(), UsageError>;

    fn increment(&self, key: &UrlKey);

    /// Clears the count for `key`. Resetting an unknown key is a no-op.
    fn reset(&self, key: &UrlKey);
}

impl<T: UsageCounter + ?Sized> UsageCounter for Arc<T> {
    fn register(&self) -> Result<(), UsageError> {
        (**self).register()
    }

    fn increment(&self, key: &UrlKey) {
        (**self).increment(key)
    }

    fn reset(&self, key: &UrlKey) {
        (**self).reset(key)
    }
}
