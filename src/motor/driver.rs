//! Pulse-driven relay motor controller.
//!
//! The motor unit latches mechanically: a short tap on a relay starts it, a
//! second tap stops it. This controller turns start/stop requests into timed
//! relay pulses followed by a settling pause, advanced by polling
//! [`MotorControllerCore::update`].

use crate::config::units::Millis;
use crate::config::MotorTiming;

use super::hardware::{RelayHardware, TimeSource};
use super::state::{OperationState, PulseState, Relay};

/// Relay pulse state machine.
///
/// Generic over:
/// - `R`: relay outputs (must implement [`RelayHardware`])
/// - `T`: millisecond clock (must implement [`TimeSource`])
///
/// At most one pulse is in flight. A new request is dropped while the pulse
/// state is not `Idle` or while the hardware reports an energized relay.
pub struct MotorControllerCore<R, T>
where
    R: RelayHardware,
    T: TimeSource,
{
    /// Relay outputs.
    relays: R,

    /// Millisecond clock.
    clock: T,

    /// Pulse and settling lengths.
    timing: MotorTiming,

    /// Pulse sub-state.
    pulse_state: PulseState,

    /// Logical running direction.
    operation_state: OperationState,

    /// Relay energized by the pulse in flight.
    active_pulse_relay: Option<Relay>,

    /// Length of the pulse in flight.
    pulse_duration: u32,

    /// When the current pulse or settling phase began.
    pulse_start_time: Millis,

    /// Relay of the most recent start pulse.
    last_movement_relay: Relay,

    /// When the most recent start pulse was issued.
    motor_start_time: Millis,
}

impl<R, T> MotorControllerCore<R, T>
where
    R: RelayHardware,
    T: TimeSource,
{
    /// Create a controller with the default pulse timing.
    pub fn new(relays: R, clock: T) -> Self {
        Self::with_timing(relays, clock, MotorTiming::default())
    }

    /// Create a controller with explicit pulse timing.
    pub fn with_timing(relays: R, clock: T, timing: MotorTiming) -> Self {
        Self {
            relays,
            clock,
            timing,
            pulse_state: PulseState::Idle,
            operation_state: OperationState::Idle,
            active_pulse_relay: None,
            pulse_duration: 0,
            pulse_start_time: Millis::default(),
            last_movement_relay: Relay::Extend,
            motor_start_time: Millis::default(),
        }
    }

    /// Advance the pulse state machine.
    ///
    /// Call on every loop iteration. Ends an active pulse once its duration has
    /// elapsed and ends settling once the settling time has elapsed.
    pub fn update(&mut self, now: Millis) {
        let elapsed = now.elapsed_since(self.pulse_start_time);

        match self.pulse_state {
            PulseState::Idle => {}
            PulseState::StartActive | PulseState::StopActive => {
                if elapsed >= self.pulse_duration {
                    self.end_pulse(now);
                }
            }
            PulseState::RelaySettling => {
                if elapsed >= self.timing.settling_ms {
                    self.finish_settling();
                }
            }
        }
    }

    /// Request a start pulse on `relay`.
    ///
    /// Dropped while busy or while any relay is energized. On acceptance the
    /// operation state follows the relay's direction.
    pub fn request_start_pulse(&mut self, relay: Relay) {
        if !self.start_pulse(relay, PulseState::StartActive, self.timing.start_pulse_ms) {
            return;
        }

        self.last_movement_relay = relay;
        self.operation_state = OperationState::for_relay(relay);
        self.motor_start_time = self.pulse_start_time;
    }

    /// Request a stop pulse on `relay`.
    ///
    /// Dropped while busy or while any relay is energized. Does not change the
    /// operation state.
    pub fn request_stop_pulse(&mut self, relay: Relay) {
        self.start_pulse(relay, PulseState::StopActive, self.timing.stop_pulse_ms);
    }

    /// Drop both relays and mark the motor idle, regardless of pulse state.
    pub fn deactivate_relays(&mut self) {
        self.relays.deactivate_all_relays();
        self.operation_state = OperationState::Idle;
        debug!("motor: relays deactivated");
    }

    /// Mark the motor idle without touching the relays.
    #[inline]
    pub fn stop_motor(&mut self) {
        self.operation_state = OperationState::Idle;
    }

    /// Whether a pulse or settling phase is in progress.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.pulse_state != PulseState::Idle
    }

    /// Whether the motor is logically running.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.operation_state.is_moving()
    }

    /// Milliseconds since the last accepted start pulse, 0 while idle.
    pub fn run_time(&self) -> u32 {
        if !self.is_moving() {
            return 0;
        }
        self.clock.now().elapsed_since(self.motor_start_time)
    }

    /// Get the pulse sub-state.
    #[inline]
    pub fn pulse_state(&self) -> PulseState {
        self.pulse_state
    }

    /// Get the logical running direction.
    #[inline]
    pub fn operation_state(&self) -> OperationState {
        self.operation_state
    }

    /// Relay energized by the pulse in flight.
    #[inline]
    pub fn active_pulse_relay(&self) -> Option<Relay> {
        self.active_pulse_relay
    }

    /// Relay of the most recent accepted start pulse.
    #[inline]
    pub fn last_movement_relay(&self) -> Relay {
        self.last_movement_relay
    }

    /// Get the pulse timing.
    #[inline]
    pub fn timing(&self) -> &MotorTiming {
        &self.timing
    }

    /// Get the clock.
    #[inline]
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Get the relay outputs.
    #[inline]
    pub fn relays(&self) -> &R {
        &self.relays
    }

    fn start_pulse(&mut self, relay: Relay, kind: PulseState, duration: u32) -> bool {
        if self.relays.is_any_relay_active() || self.pulse_state != PulseState::Idle {
            trace!("motor: pulse on {} dropped, controller busy", relay);
            return false;
        }

        self.relays.set_relay_high(relay);
        self.active_pulse_relay = Some(relay);
        self.pulse_duration = duration;
        self.pulse_start_time = self.clock.now();
        self.pulse_state = kind;
        debug!("motor: {} pulse on {} for {} ms", kind, relay, duration);
        true
    }

    fn end_pulse(&mut self, now: Millis) {
        if let Some(relay) = self.active_pulse_relay {
            self.relays.set_relay_low(relay);
        }
        self.pulse_start_time = now;
        self.pulse_state = PulseState::RelaySettling;
    }

    fn finish_settling(&mut self) {
        self.pulse_state = PulseState::Idle;
        self.active_pulse_relay = None;
    }
}
