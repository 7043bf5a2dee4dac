//! Awning command and decision layer.
//!
//! Owns target semantics and decides when to start and stop the motor. Every
//! command is total: inputs are clamped and redundant commands are no-ops, so
//! a moving awning always ends up with the motor off rather than in an error
//! state.

use crate::config::limits::{POSITION_TOLERANCE, POSITION_UPDATE_INTERVAL_MS};
use crate::config::units::{clamp_percent, percent_distance, Millis};
use crate::motor::{Detached, MotorHardware, PositionTracker, Relay};

use super::state::AwningState;

/// Awning state machine.
///
/// Generic over the motor interface `M`. The motor is optional: without one
/// the machine runs as pure logic, which is how it is exercised in tests and
/// simulations.
///
/// While [`AwningState::Idle`], [`update`](Self::update) never inspects the
/// position, so drift of the estimate cannot restart the motor. Only
/// [`set_target`](Self::set_target) starts motion.
pub struct AwningStateMachine<M = Detached>
where
    M: MotorHardware,
{
    /// Position estimate.
    tracker: PositionTracker,

    /// Motor interface, `None` for pure logic.
    motor: Option<M>,

    /// Current state.
    state: AwningState,

    /// Requested position in percent.
    target_position: f32,

    /// Relay of the most recent start.
    last_movement_relay: Relay,

    /// Timestamp of the last integration, `None` until seeded.
    last_update: Option<Millis>,

    /// Minimum interval between integrations.
    update_interval_ms: u32,
}

impl AwningStateMachine<Detached> {
    /// Create a state machine without motor hardware.
    pub fn detached(tracker: PositionTracker) -> Self {
        Self::new(tracker, None)
    }
}

impl<M> AwningStateMachine<M>
where
    M: MotorHardware,
{
    /// Create a state machine around `tracker`, idle at the tracked position.
    pub fn new(tracker: PositionTracker, motor: Option<M>) -> Self {
        let mut tracker = tracker;
        let target_position = tracker.current_position();
        tracker.set_target_position(target_position);

        Self {
            tracker,
            motor,
            state: AwningState::Idle,
            target_position,
            last_movement_relay: Relay::Extend,
            last_update: None,
            update_interval_ms: POSITION_UPDATE_INTERVAL_MS,
        }
    }

    /// Set the minimum interval between position integrations (at least 1 ms).
    pub fn with_update_interval(mut self, ms: u32) -> Self {
        self.update_interval_ms = ms.max(1);
        self
    }

    /// Move towards `target` percent.
    ///
    /// | state     | required direction | action                              |
    /// |-----------|--------------------|-------------------------------------|
    /// | any       | none (in tolerance)| stop with pulse if moving           |
    /// | idle      | extend / retract   | start                               |
    /// | same      | same               | nothing                             |
    /// | opposite  | opposite           | drop relays, start the other way    |
    pub fn set_target(&mut self, target: f32) {
        let target = clamp_percent(target);
        self.target_position = target;
        self.tracker.set_target_position(target);

        let required = AwningState::from(self.tracker.required_direction());

        if required == AwningState::Idle {
            if self.is_moving() {
                self.stop_motor(self.last_movement_relay, true);
            }
            return;
        }

        if self.state == AwningState::Idle {
            self.start_motor(required);
            return;
        }

        if self.state == required {
            return;
        }

        // Reversal: no stop pulse, the start pulse on the other relay takes over.
        info!("awning: reversing to {}", required);
        if let Some(motor) = self.motor.as_mut() {
            motor.deactivate_relays();
        }
        self.start_motor(required);
    }

    /// Freeze at the current position and stop via `relay`.
    pub fn stop(&mut self, relay: Relay) {
        self.freeze_target();
        self.stop_motor(relay, true);
    }

    /// Freeze at the current position and send stop pulses on both relays.
    ///
    /// For when the caller cannot tell which relay was driving.
    pub fn stop_both(&mut self) {
        self.freeze_target();
        if let Some(motor) = self.motor.as_mut() {
            for relay in Relay::ALL {
                motor.send_stop_pulse(relay);
            }
            motor.deactivate_relays();
        }
        self.state = AwningState::Idle;
        info!("awning: stopped both relays at {}", self.tracker.current_position());
    }

    /// Advance the position estimate and stop on target or limit.
    ///
    /// Does nothing but record `now` while idle. While moving, integrates at
    /// most once per update interval. Hitting 0 % or 100 % stops without a stop
    /// pulse; the end stop already halted the motor.
    pub fn update(&mut self, now: Millis) {
        if self.state == AwningState::Idle {
            self.last_update = Some(now);
            return;
        }

        let Some(last_update) = self.last_update else {
            self.last_update = Some(now);
            return;
        };

        let delta = now.elapsed_since(last_update);
        if delta < self.update_interval_ms {
            return;
        }

        let direction = self.state.direction();
        self.tracker.update_position(direction, delta);
        self.last_update = Some(now);

        let at_target = self.has_reached_target();
        let at_limit = self.tracker.has_reached_limit(direction);

        if at_target || at_limit {
            self.stop_motor(self.last_movement_relay, !at_limit);
        }
    }

    /// Restore a persisted position; the target follows it.
    pub fn set_current_position(&mut self, position: f32) {
        self.tracker.set_current_position(position);
        self.freeze_target();
    }

    /// Forget the last update timestamp.
    ///
    /// The next moving update only seeds the timestamp. Call after the time
    /// source was reset so a bogus delta is never integrated.
    pub fn reset_clock(&mut self) {
        self.last_update = None;
    }

    /// Get the current state.
    #[inline]
    pub fn state(&self) -> AwningState {
        self.state
    }

    /// Get the estimated position in percent.
    #[inline]
    pub fn current_position(&self) -> f32 {
        self.tracker.current_position()
    }

    /// Get the requested position in percent.
    #[inline]
    pub fn target_position(&self) -> f32 {
        self.target_position
    }

    /// Whether the awning is moving.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.state.is_moving()
    }

    /// Relay of the most recent start.
    #[inline]
    pub fn last_movement_relay(&self) -> Relay {
        self.last_movement_relay
    }

    /// Get the position tracker.
    #[inline]
    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    /// Get the position tracker mutably (calibration, tests).
    #[inline]
    pub fn tracker_mut(&mut self) -> &mut PositionTracker {
        &mut self.tracker
    }

    /// Get the motor interface, if any.
    #[inline]
    pub fn motor(&self) -> Option<&M> {
        self.motor.as_ref()
    }

    /// Get the motor interface mutably, if any.
    #[inline]
    pub fn motor_mut(&mut self) -> Option<&mut M> {
        self.motor.as_mut()
    }

    fn has_reached_target(&self) -> bool {
        percent_distance(self.tracker.current_position(), self.target_position) < POSITION_TOLERANCE
    }

    fn freeze_target(&mut self) {
        self.target_position = self.tracker.current_position();
        self.tracker.set_target_position(self.target_position);
    }

    fn start_motor(&mut self, direction: AwningState) {
        let Some(relay) = direction.relay() else {
            return;
        };

        self.last_movement_relay = relay;
        if let Some(motor) = self.motor.as_mut() {
            motor.send_start_pulse(relay);
        }
        self.state = direction;
        info!(
            "awning: {} from {} to {}",
            direction,
            self.tracker.current_position(),
            self.target_position
        );
    }

    fn stop_motor(&mut self, relay: Relay, send_pulse: bool) {
        if let Some(motor) = self.motor.as_mut() {
            if send_pulse {
                motor.send_stop_pulse(relay);
            }
            motor.deactivate_relays();
        }
        self.state = AwningState::Idle;
        info!(
            "awning: stopped at {} (pulse: {})",
            self.tracker.current_position(),
            send_pulse
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle_at_tracked_position() {
        let mut tracker = PositionTracker::new();
        tracker.set_current_position(30.0);

        let awning = AwningStateMachine::detached(tracker);
        assert_eq!(awning.state(), AwningState::Idle);
        assert_eq!(awning.target_position(), 30.0);
    }

    #[test]
    fn test_first_moving_update_only_seeds_clock() {
        let mut tracker = PositionTracker::new();
        tracker.set_travel_time(10_000);
        let mut awning = AwningStateMachine::detached(tracker);

        awning.set_target(50.0);
        awning.update(Millis(5_000));
        assert_eq!(awning.current_position(), 0.0);

        awning.update(Millis(5_100));
        assert!((awning.current_position() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_updates_below_interval_are_skipped() {
        let mut tracker = PositionTracker::new();
        tracker.set_travel_time(10_000);
        let mut awning = AwningStateMachine::detached(tracker);

        awning.update(Millis(0));
        awning.set_target(50.0);
        awning.update(Millis(99));
        assert_eq!(awning.current_position(), 0.0);

        awning.update(Millis(150));
        assert!((awning.current_position() - 1.5).abs() < 0.01);
    }

    #[test]
    fn test_reset_clock_discards_stale_timestamp() {
        let mut tracker = PositionTracker::new();
        tracker.set_travel_time(10_000);
        let mut awning = AwningStateMachine::detached(tracker);

        awning.update(Millis(0));
        awning.set_target(80.0);
        awning.reset_clock();

        // Without the reset this would integrate 4 s at once.
        awning.update(Millis(4_000));
        assert_eq!(awning.current_position(), 0.0);
        assert!(awning.is_moving());
    }

    #[test]
    fn test_set_current_position_clamps_and_freezes_target() {
        let mut awning = AwningStateMachine::detached(PositionTracker::new());
        awning.set_current_position(130.0);

        assert_eq!(awning.current_position(), 100.0);
        assert_eq!(awning.target_position(), 100.0);
        assert!(!awning.is_moving());
    }
}
