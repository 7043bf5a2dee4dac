//! Persisted awning state.

use serde::{Deserialize, Serialize};

use super::limits::{
    clamp_travel_time, clamp_wind_threshold, DEFAULT_TRAVEL_TIME_MS, DEFAULT_WIND_THRESHOLD,
};
use super::units::clamp_percent;

/// Values the caller stores across reboots.
///
/// Loading never fails on out-of-range values: [`AwningConfig::clamped`]
/// pulls them back into their bounds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct AwningConfig {
    /// Time for a full 0 to 100 % traversal, in milliseconds.
    pub travel_time_ms: u32,

    /// Last known position in percent (0 = retracted).
    #[serde(rename = "position_percent")]
    pub position: f32,

    /// Wind cutoff threshold in anemometer pulses per minute (0 = disabled).
    #[serde(rename = "wind_threshold_ppm")]
    pub wind_threshold: u32,
}

impl Default for AwningConfig {
    fn default() -> Self {
        Self {
            travel_time_ms: DEFAULT_TRAVEL_TIME_MS,
            position: 0.0,
            wind_threshold: DEFAULT_WIND_THRESHOLD,
        }
    }
}

impl AwningConfig {
    /// Return a copy with every field inside its valid range.
    pub fn clamped(self) -> Self {
        Self {
            travel_time_ms: clamp_travel_time(self.travel_time_ms),
            position: clamp_percent(self.position),
            wind_threshold: clamp_wind_threshold(self.wind_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped() {
        let config = AwningConfig {
            travel_time_ms: 1,
            position: 140.0,
            wind_threshold: 9_999,
        }
        .clamped();

        assert_eq!(config.travel_time_ms, 5_000);
        assert_eq!(config.position, 100.0);
        assert_eq!(config.wind_threshold, 1_000);
    }
}
