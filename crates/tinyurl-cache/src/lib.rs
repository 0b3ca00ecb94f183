//! Cache implementations for the tinyurl service.

pub mod moka;
pub mod redis;

pub use self::moka::{MokaCache, MokaCacheConfig};
pub use self::redis::RedisCache;
pub use tinyurl_core::{Cache, CacheError};
