//! Time-based position estimation.
//!
//! The awning has no position sensor. Position is inferred from how long the
//! motor has been running relative to the calibrated full-travel time.

use crate::config::limits::{
    clamp_travel_time, DEFAULT_TRAVEL_TIME_MS, MAX_POSITION, MIN_POSITION, POSITION_TOLERANCE,
};
use crate::config::units::{clamp_percent, percent_distance};
use crate::config::AwningConfig;

use super::state::MotionDirection;

/// Estimated awning position.
///
/// Every setter clamps its input; there are no failure states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionTracker {
    /// Estimated extension in percent.
    current_position: f32,
    /// Requested extension in percent.
    target_position: f32,
    /// Time for a full 0 to 100 % traversal.
    travel_time_ms: u32,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionTracker {
    /// Create a tracker at 0 % with the default travel time.
    #[inline]
    pub fn new() -> Self {
        Self {
            current_position: MIN_POSITION,
            target_position: MIN_POSITION,
            travel_time_ms: DEFAULT_TRAVEL_TIME_MS,
        }
    }

    /// Create a tracker from persisted state.
    ///
    /// Both current and target start at the stored position.
    pub fn from_config(config: &AwningConfig) -> Self {
        let position = clamp_percent(config.position);
        Self {
            current_position: position,
            target_position: position,
            travel_time_ms: clamp_travel_time(config.travel_time_ms),
        }
    }

    /// Set the full-travel time in milliseconds.
    #[inline]
    pub fn set_travel_time(&mut self, ms: u32) {
        self.travel_time_ms = clamp_travel_time(ms);
    }

    /// Set the estimated position in percent.
    #[inline]
    pub fn set_current_position(&mut self, position: f32) {
        self.current_position = clamp_percent(position);
    }

    /// Set the requested position in percent.
    #[inline]
    pub fn set_target_position(&mut self, position: f32) {
        self.target_position = clamp_percent(position);
    }

    /// Get the estimated position in percent.
    #[inline]
    pub fn current_position(&self) -> f32 {
        self.current_position
    }

    /// Get the requested position in percent.
    #[inline]
    pub fn target_position(&self) -> f32 {
        self.target_position
    }

    /// Get the full-travel time in milliseconds.
    #[inline]
    pub fn travel_time_ms(&self) -> u32 {
        self.travel_time_ms
    }

    /// Percentage of full travel covered in `delta_ms` at the configured rate.
    #[inline]
    pub fn calculate_position_change(&self, delta_ms: u32) -> f32 {
        delta_ms as f32 / self.travel_time_ms as f32 * 100.0
    }

    /// Advance the estimate by `delta_ms` of motor-on time in `direction`.
    pub fn update_position(&mut self, direction: MotionDirection, delta_ms: u32) {
        let change = self.calculate_position_change(delta_ms);
        match direction {
            MotionDirection::Extending => {
                self.set_current_position(self.current_position + change);
            }
            MotionDirection::Retracting => {
                self.set_current_position(self.current_position - change);
            }
            MotionDirection::Idle => {}
        }
    }

    /// Whether the estimate is within tolerance of the target.
    #[inline]
    pub fn has_reached_target(&self) -> bool {
        percent_distance(self.current_position, self.target_position) < POSITION_TOLERANCE
    }

    /// Whether the estimate sits at the end of travel for `direction`.
    #[inline]
    pub fn has_reached_limit(&self, direction: MotionDirection) -> bool {
        match direction {
            MotionDirection::Extending => self.current_position >= MAX_POSITION,
            MotionDirection::Retracting => self.current_position <= MIN_POSITION,
            MotionDirection::Idle => false,
        }
    }

    /// Direction needed to reach the target, `Idle` within tolerance.
    pub fn required_direction(&self) -> MotionDirection {
        if self.has_reached_target() {
            MotionDirection::Idle
        } else if self.target_position > self.current_position {
            MotionDirection::Extending
        } else {
            MotionDirection::Retracting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_change_formula() {
        let mut tracker = PositionTracker::new();
        tracker.set_travel_time(10_000);

        assert!((tracker.calculate_position_change(1_000) - 10.0).abs() < 0.001);
        assert!((tracker.calculate_position_change(100) - 1.0).abs() < 0.001);
        assert_eq!(tracker.calculate_position_change(0), 0.0);
    }

    #[test]
    fn test_update_position_extend_and_retract() {
        let mut tracker = PositionTracker::new();
        tracker.set_travel_time(10_000);

        tracker.update_position(MotionDirection::Extending, 2_500);
        assert!((tracker.current_position() - 25.0).abs() < 0.01);

        tracker.update_position(MotionDirection::Retracting, 1_000);
        assert!((tracker.current_position() - 15.0).abs() < 0.01);

        tracker.update_position(MotionDirection::Idle, 5_000);
        assert!((tracker.current_position() - 15.0).abs() < 0.01);
    }

    #[test]
    fn test_update_position_clamps_at_limits() {
        let mut tracker = PositionTracker::new();
        tracker.set_travel_time(10_000);
        tracker.set_current_position(95.0);

        tracker.update_position(MotionDirection::Extending, 3_000);
        assert_eq!(tracker.current_position(), 100.0);
        assert!(tracker.has_reached_limit(MotionDirection::Extending));
        assert!(!tracker.has_reached_limit(MotionDirection::Retracting));

        tracker.update_position(MotionDirection::Retracting, 60_000);
        assert_eq!(tracker.current_position(), 0.0);
        assert!(tracker.has_reached_limit(MotionDirection::Retracting));
    }

    #[test]
    fn test_required_direction() {
        let mut tracker = PositionTracker::new();
        tracker.set_current_position(50.0);

        tracker.set_target_position(80.0);
        assert_eq!(tracker.required_direction(), MotionDirection::Extending);

        tracker.set_target_position(20.0);
        assert_eq!(tracker.required_direction(), MotionDirection::Retracting);

        tracker.set_target_position(50.6);
        assert!(tracker.has_reached_target());
        assert_eq!(tracker.required_direction(), MotionDirection::Idle);
    }

    #[test]
    fn test_travel_time_clamped() {
        let mut tracker = PositionTracker::new();
        assert_eq!(tracker.travel_time_ms(), 15_000);

        tracker.set_travel_time(10);
        assert_eq!(tracker.travel_time_ms(), 5_000);

        tracker.set_travel_time(1_000_000);
        assert_eq!(tracker.travel_time_ms(), 300_000);
    }

    #[test]
    fn test_from_config() {
        let config = AwningConfig {
            travel_time_ms: 20_000,
            position: 35.0,
            wind_threshold: 0,
        };
        let tracker = PositionTracker::from_config(&config);

        assert_eq!(tracker.current_position(), 35.0);
        assert_eq!(tracker.target_position(), 35.0);
        assert_eq!(tracker.travel_time_ms(), 20_000);
        assert!(tracker.has_reached_target());
    }
}
