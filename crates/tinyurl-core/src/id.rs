use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The pre-encoding identifier of a url document.
///
/// Always within `[0, 2^63)`, so it fits a signed 64-bit column and a
/// negative value can never reach the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct NumericId(u64);

impl NumericId {
    /// Largest representable id (`2^63 - 1`).
    pub const MAX: NumericId = NumericId(i64::MAX as u64);

    pub const ZERO: NumericId = NumericId(0);

    /// Creates a `NumericId`, rejecting values at or above `2^63`.
    pub fn new(value: u64) -> Result<Self> {
        if value > Self::MAX.0 {
            return Err(CoreError::InvalidId(format!(
                "{value} does not fit in 63 bits"
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Returns the id as a signed integer, which is lossless by construction.
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl TryFrom<u64> for NumericId {
    type Error = CoreError;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i64> for NumericId {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self> {
        if value < 0 {
            return Err(CoreError::InvalidId(format!("{value} is negative")));
        }
        Ok(Self(value as u64))
    }
}

impl From<NumericId> for u64 {
    fn from(value: NumericId) -> Self {
        value.0
    }
}

impl Display for NumericId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
