//! Core types and traits for the tinyurl service.
//!
//! This crate provides the key encoder, the url document model, the ports
//! the service consumes (store, cache, usage counter, clock) and the service
//! contract the transport layer calls into.

pub mod base58;
pub mod cache;
pub mod clock;
pub mod document;
pub mod error;
pub mod id;
pub mod key;
pub mod service;
pub mod store;
pub mod target;
pub mod usage;

pub use cache::Cache;
pub use clock::{Clock, SystemClock};
pub use document::UrlDocument;
pub use error::{CacheError, CoreError, ServiceError, StoreError, UsageError};
pub use id::NumericId;
pub use key::UrlKey;
pub use service::TinyUrlService;
pub use store::Store;
pub use target::validate_target_url;
pub use usage::UsageCounter;
