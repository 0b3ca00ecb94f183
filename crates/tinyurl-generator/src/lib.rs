pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use tinyurl_core::NumericId;

/// Trait for generating numeric ids, which the key encoder turns into url keys.
///
/// Implementations are pure generators that don't interact with storage.
/// Whether two calls can yield the same id depends on the implementation;
/// the store is the place where a collision is finally detected.
pub trait Generator: Send + Sync + 'static {
    fn generate(&self) -> NumericId;
}
