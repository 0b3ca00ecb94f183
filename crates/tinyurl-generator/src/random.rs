use crate::Generator;
use rand::Rng;
use tinyurl_core::{Clock, NumericId, SystemClock};

/// Draws ids uniformly from `[0, now)`, where `now` is the current unix
/// timestamp in seconds.
///
/// This trades strict uniqueness for simplicity: two generators (or two calls)
/// can draw the same id, and nothing here checks for it. With roughly 1.7e9
/// possible values the odds of a given pair colliding are negligible, but they
/// grow with the number of stored keys. Use [`SeqGenerator`](crate::SeqGenerator)
/// when ids must be unique, and rely on the store's conflict check otherwise.
#[derive(Debug, Clone, Default)]
pub struct RandomGenerator<C = SystemClock> {
    clock: C,
}

impl RandomGenerator<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> RandomGenerator<C> {
    /// Creates a generator whose upper bound comes from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    fn upper_bound(&self) -> u64 {
        // an empty range would panic, so a clock at or before the epoch yields 0
        self.clock.now().as_second().max(1) as u64
    }
}

impl<C: Clock> Generator for RandomGenerator<C> {
    fn generate(&self) -> NumericId {
        let value = rand::rng().random_range(0..self.upper_bound());
        // the bound is a positive i64, so the value always fits in 63 bits
        NumericId::new(value).unwrap_or(NumericId::ZERO)
    }
}
