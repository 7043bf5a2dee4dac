//! Motor pulse timing configuration.

use serde::{Deserialize, Serialize};

use super::limits::{
    MOTOR_START_PULSE_MS, MOTOR_STOP_PULSE_MS, POSITION_UPDATE_INTERVAL_MS,
    RELAY_SETTLING_TIME_MS, WIND_WINDOW_MS,
};

/// Pulse and polling intervals for the relay motor.
///
/// Every field falls back to the firmware default when omitted from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct MotorTiming {
    /// Start pulse length in milliseconds.
    pub start_pulse_ms: u32,

    /// Stop pulse length in milliseconds.
    pub stop_pulse_ms: u32,

    /// Settling pause after a relay drops, in milliseconds.
    pub settling_ms: u32,

    /// Minimum interval between position integrations, in milliseconds.
    pub update_interval_ms: u32,

    /// Wind evaluation window in milliseconds.
    pub wind_window_ms: u32,
}

impl Default for MotorTiming {
    fn default() -> Self {
        Self {
            start_pulse_ms: MOTOR_START_PULSE_MS,
            stop_pulse_ms: MOTOR_STOP_PULSE_MS,
            settling_ms: RELAY_SETTLING_TIME_MS,
            update_interval_ms: POSITION_UPDATE_INTERVAL_MS,
            wind_window_ms: WIND_WINDOW_MS,
        }
    }
}

impl MotorTiming {
    /// Worst-case time one pulse keeps the controller busy.
    pub fn busy_window_ms(&self, start: bool) -> u32 {
        let pulse = if start {
            self.start_pulse_ms
        } else {
            self.stop_pulse_ms
        };
        pulse.saturating_add(self.settling_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_firmware_constants() {
        let timing = MotorTiming::default();
        assert_eq!(timing.start_pulse_ms, 1_000);
        assert_eq!(timing.stop_pulse_ms, 100);
        assert_eq!(timing.settling_ms, 100);
        assert_eq!(timing.update_interval_ms, 100);
    }

    #[test]
    fn test_busy_window() {
        let timing = MotorTiming::default();
        assert_eq!(timing.busy_window_ms(true), 1_100);
        assert_eq!(timing.busy_window_ms(false), 200);
    }
}
