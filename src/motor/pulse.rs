//! Blocking pulse adapter used by the awning state machine.

use embedded_hal::delay::DelayNs;

use super::driver::MotorControllerCore;
use super::hardware::{RelayHardware, TimeSource};
use super::state::Relay;

/// How often [`PulseMotor`] polls the controller while a pulse is in flight.
pub const PULSE_POLL_INTERVAL_MS: u32 = 5;

/// Motor commands issued by the awning state machine.
pub trait MotorHardware {
    /// Tap `relay` to latch the motor running.
    fn send_start_pulse(&mut self, relay: Relay);

    /// Tap `relay` to unlatch the motor.
    fn send_stop_pulse(&mut self, relay: Relay);

    /// Drop both relays immediately.
    fn deactivate_relays(&mut self);
}

impl<M: MotorHardware + ?Sized> MotorHardware for &mut M {
    fn send_start_pulse(&mut self, relay: Relay) {
        (**self).send_start_pulse(relay)
    }

    fn send_stop_pulse(&mut self, relay: Relay) {
        (**self).send_stop_pulse(relay)
    }

    fn deactivate_relays(&mut self) {
        (**self).deactivate_relays()
    }
}

/// Placeholder motor type for a state machine without hardware.
///
/// Uninhabited: `Option<Detached>` is always `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detached {}

impl MotorHardware for Detached {
    fn send_start_pulse(&mut self, _relay: Relay) {
        match *self {}
    }

    fn send_stop_pulse(&mut self, _relay: Relay) {
        match *self {}
    }

    fn deactivate_relays(&mut self) {
        match *self {}
    }
}

/// [`MotorHardware`] on top of [`MotorControllerCore`].
///
/// Each pulse request spins on `DELAY` until the controller has finished the
/// pulse and its settling time, so callers see a completed pulse when the
/// method returns. The spin is bounded by the busy window of the pulse (about
/// 1.1 s for a start pulse with the default timing); if the clock stalls the
/// adapter logs a warning and returns with the controller still busy.
pub struct PulseMotor<R, T, DELAY>
where
    R: RelayHardware,
    T: TimeSource,
    DELAY: DelayNs,
{
    /// Pulse state machine.
    core: MotorControllerCore<R, T>,

    /// Delay provider for the spin.
    delay: DELAY,
}

impl<R, T, DELAY> PulseMotor<R, T, DELAY>
where
    R: RelayHardware,
    T: TimeSource,
    DELAY: DelayNs,
{
    /// Wrap a controller.
    pub fn new(core: MotorControllerCore<R, T>, delay: DELAY) -> Self {
        Self { core, delay }
    }

    /// Get the underlying controller.
    #[inline]
    pub fn core(&self) -> &MotorControllerCore<R, T> {
        &self.core
    }

    /// Get the underlying controller mutably.
    #[inline]
    pub fn core_mut(&mut self) -> &mut MotorControllerCore<R, T> {
        &mut self.core
    }

    /// Give the controller and delay back.
    pub fn release(self) -> (MotorControllerCore<R, T>, DELAY) {
        (self.core, self.delay)
    }

    /// Spin until the pulse and its settling delay are over, giving up after
    /// the busy window of that pulse plus two polls.
    fn wait_until_idle(&mut self, start: bool) {
        let window_ms = self.core.timing().busy_window_ms(start);
        let max_polls = window_ms / PULSE_POLL_INTERVAL_MS + 2;
        let mut polls = 0;
        while self.core.is_busy() {
            if polls >= max_polls {
                warn!("pulse motor: still busy after {} ms, giving up", window_ms);
                return;
            }
            polls += 1;
            self.delay.delay_ms(PULSE_POLL_INTERVAL_MS);
            let now = self.core.clock().now();
            self.core.update(now);
        }
    }
}

impl<R, T, DELAY> MotorHardware for PulseMotor<R, T, DELAY>
where
    R: RelayHardware,
    T: TimeSource,
    DELAY: DelayNs,
{
    fn send_start_pulse(&mut self, relay: Relay) {
        self.core.request_start_pulse(relay);
        self.wait_until_idle(true);
    }

    fn send_stop_pulse(&mut self, relay: Relay) {
        self.core.request_stop_pulse(relay);
        self.wait_until_idle(false);
        self.core.stop_motor();
    }

    fn deactivate_relays(&mut self) {
        self.core.deactivate_relays();
    }
}
