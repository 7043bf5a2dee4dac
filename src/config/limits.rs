//! Position, travel-time and timing bounds.

/// Fully retracted.
pub const MIN_POSITION: f32 = 0.0;
/// Fully extended.
pub const MAX_POSITION: f32 = 100.0;
/// Band (in percent) within which current and target count as equal.
pub const POSITION_TOLERANCE: f32 = 1.0;

/// Shortest accepted full-travel time.
pub const MIN_TRAVEL_TIME_MS: u32 = 5_000;
/// Longest accepted full-travel time.
pub const MAX_TRAVEL_TIME_MS: u32 = 300_000;
/// Full-travel time used until calibrated.
pub const DEFAULT_TRAVEL_TIME_MS: u32 = 15_000;

/// Start pulse length. Long enough to latch the motor unit's internal relay.
pub const MOTOR_START_PULSE_MS: u32 = 1_000;
/// Stop pulse length.
pub const MOTOR_STOP_PULSE_MS: u32 = 100;
/// Pause after a relay drops before the next pulse may be issued.
pub const RELAY_SETTLING_TIME_MS: u32 = 100;
/// Minimum interval between two position integrations.
pub const POSITION_UPDATE_INTERVAL_MS: u32 = 100;

/// Longest pulse or settling time accepted from configuration.
pub const MAX_PULSE_MS: u32 = 5_000;

/// Wind threshold disabling the cutoff.
pub const MIN_WIND_THRESHOLD: u32 = 0;
/// Highest accepted wind threshold (pulses per minute).
pub const MAX_WIND_THRESHOLD: u32 = 1_000;
/// Wind threshold used until configured (pulses per minute).
pub const DEFAULT_WIND_THRESHOLD: u32 = 100;
/// Length of the wind evaluation window.
pub const WIND_WINDOW_MS: u32 = 60_000;

/// Clamp a travel time into `[MIN_TRAVEL_TIME_MS, MAX_TRAVEL_TIME_MS]`.
#[inline]
pub fn clamp_travel_time(ms: u32) -> u32 {
    ms.clamp(MIN_TRAVEL_TIME_MS, MAX_TRAVEL_TIME_MS)
}

/// Clamp a wind threshold into `[MIN_WIND_THRESHOLD, MAX_WIND_THRESHOLD]`.
#[inline]
pub fn clamp_wind_threshold(threshold: u32) -> u32 {
    threshold.clamp(MIN_WIND_THRESHOLD, MAX_WIND_THRESHOLD)
}
