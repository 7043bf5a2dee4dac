//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::limits::MAX_PULSE_MS;
use super::{MotorTiming, SystemConfig};

/// Validate a system configuration.
///
/// Persisted awning values are clamped rather than rejected. Timing values
/// that would break the pulse protocol are rejected:
/// - pulse lengths must be in `1..=MAX_PULSE_MS`
/// - settling time must be in `1..=MAX_PULSE_MS`
/// - update interval must be non-zero
/// - wind window must be non-zero
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_timing(&config.timing)
}

fn validate_timing(timing: &MotorTiming) -> Result<()> {
    for pulse in [timing.start_pulse_ms, timing.stop_pulse_ms] {
        if pulse == 0 || pulse > MAX_PULSE_MS {
            return Err(Error::Config(ConfigError::InvalidPulseDuration(pulse)));
        }
    }

    if timing.settling_ms == 0 || timing.settling_ms > MAX_PULSE_MS {
        return Err(Error::Config(ConfigError::InvalidSettlingTime(
            timing.settling_ms,
        )));
    }

    if timing.update_interval_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidUpdateInterval(
            timing.update_interval_ms,
        )));
    }

    if timing.wind_window_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidWindWindow(
            timing.wind_window_ms,
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SystemConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_stop_pulse_rejected() {
        let mut config = SystemConfig::default();
        config.timing.stop_pulse_ms = 0;

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidPulseDuration(0)))
        ));
    }

    #[test]
    fn test_oversized_settling_rejected() {
        let mut config = SystemConfig::default();
        config.timing.settling_ms = MAX_PULSE_MS + 1;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSettlingTime(_)))
        ));
    }
}
