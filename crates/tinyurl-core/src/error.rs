use thiserror::Error;

/// Result type for core value construction (ids, keys, target urls).
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building core values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("numeric id out of range: {0}")]
    InvalidId(String),
    #[error("invalid url key: {0}")]
    InvalidKey(String),
    #[error("invalid target url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("no document found for key: {0}")]
    NotFound(String),
    #[error("key already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("no cache entry for key: {0}")]
    NotFound(String),
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation timed out: {0}")]
    Timeout(String),
    #[error("cache serialization failed: {0}")]
    Serialization(String),
    #[error("cache value is invalid: {0}")]
    InvalidData(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("usage counter is already registered")]
    AlreadyRegistered,
}

/// Errors returned by the tiny url service contract.
///
/// `CacheDegraded` is never the outcome of an operation: it is the form in which
/// swallowed cache failures are logged.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no entry found for key: {0}")]
    NotFound(String),
    #[error("storage failure: {0}")]
    StorageFailure(#[source] StoreError),
    #[error("cache degraded: {0}")]
    CacheDegraded(#[source] CacheError),
    #[error("metric registration failed: {0}")]
    Metrics(#[from] UsageError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ServiceError {
    fn from(value: CoreError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(key) => Self::NotFound(key),
            other => Self::StorageFailure(other),
        }
    }
}

impl From<CacheError> for ServiceError {
    fn from(value: CacheError) -> Self {
        Self::CacheDegraded(value)
    }
}
