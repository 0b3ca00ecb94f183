//! The tiny url service: key generation and deletion on one side, cache-aside
//! resolution on the other, over injected store, cache and usage ports.

pub mod config;
pub mod mutation;
mod projection;
pub mod resolver;
pub mod service;
pub mod usage;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ServiceConfig;
pub use mutation::MutationService;
pub use resolver::CacheAsideResolver;
pub use service::UrlService;
pub use usage::MetricsUsageCounter;

pub(crate) type Result<T> = std::result::Result<T, tinyurl_core::ServiceError>;
