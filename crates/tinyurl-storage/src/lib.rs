//! Store implementations for the tinyurl service.

pub mod memory;
pub mod mysql;
pub mod reaper;

pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
pub use reaper::ExpiryReaper;
pub use tinyurl_core::{Store, StoreError};
