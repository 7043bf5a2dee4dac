//! Unit types for time and position.
//!
//! Timestamps come from a free-running millisecond counter that wraps, so every
//! elapsed-time computation goes through [`Millis::elapsed_since`].

use core::ops::Add;

use serde::{Deserialize, Serialize};

use super::limits::{MAX_POSITION, MIN_POSITION};

/// Monotonic millisecond timestamp (wraps after ~49.7 days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Millis(pub u32);

impl Millis {
    /// Create a new timestamp.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw counter value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`.
    ///
    /// Uses wrapping subtraction, so the result stays correct across a
    /// counter rollover as long as the real interval is below `u32::MAX` ms.
    #[inline]
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl Add<u32> for Millis {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        Self(self.0.wrapping_add(rhs))
    }
}

/// Clamp a percentage into `[MIN_POSITION, MAX_POSITION]`.
///
/// NaN maps to `MIN_POSITION` so a corrupt input can only ever mean "retracted".
#[inline]
pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        MIN_POSITION
    } else {
        value.clamp(MIN_POSITION, MAX_POSITION)
    }
}

/// Absolute difference of two percentages.
#[inline]
pub fn percent_distance(a: f32, b: f32) -> f32 {
    libm::fabsf(a - b)
}
