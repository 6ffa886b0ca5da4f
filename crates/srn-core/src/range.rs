//! Inclusive integer ranges that rolls are drawn from.

use std::fmt;

use thiserror::Error;

/// Minimum used when the stored defaults are unusable.
pub const FALLBACK_MIN: i32 = 1;

/// Maximum used when the stored defaults are unusable.
pub const FALLBACK_MAX: i32 = 6;

/// Returned when a range would have its bounds in the wrong order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid range: min {min} is greater than max {max}")]
pub struct RangeError {
    /// Requested minimum.
    pub min: i32,
    /// Requested maximum.
    pub max: i32,
}

/// An inclusive `[min, max]` range with `min <= max`.
///
/// The only way to obtain one is through a validating constructor, so every
/// value of this type satisfies the ordering invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RollRange {
    min: i32,
    max: i32,
}

impl RollRange {
    /// The built-in `[1, 6]` range.
    pub const FALLBACK: Self = Self { min: FALLBACK_MIN, max: FALLBACK_MAX };

    /// Create a range, rejecting `min > max`.
    pub fn new(min: i32, max: i32) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Same range with a new minimum.
    pub fn with_min(self, min: i32) -> Result<Self, RangeError> {
        Self::new(min, self.max)
    }

    /// Same range with a new maximum.
    pub fn with_max(self, max: i32) -> Result<Self, RangeError> {
        Self::new(self.min, max)
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for RollRange {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for RollRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
