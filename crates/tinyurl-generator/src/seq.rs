use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use tinyurl_core::NumericId;

/// A sequential id generator.
///
/// Ids are unique within a single instance with no store round trip. For
/// several nodes, give each one a disjoint offset range (e.g. node 1 starts at
/// 0, node 2 at 1_000_000_000).
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::with_offset(NumericId::ZERO)
    }

    /// Creates a generator starting from a specific id.
    ///
    /// Useful for resuming from a known state or distributing id ranges
    /// across nodes.
    pub fn with_offset(offset: NumericId) -> Self {
        Self {
            counter: AtomicU64::new(offset.get()),
        }
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> NumericId {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        // wraps to zero once the 63-bit space is exhausted
        NumericId::new(count).unwrap_or(NumericId::ZERO)
    }
}
