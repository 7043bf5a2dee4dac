//! Shared fakes for the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use awning_control::{Millis, MotorHardware, Relay, RelayHardware, TimeSource};
use embedded_hal::delay::DelayNs;

// =============================================================================
// Relays
// =============================================================================

/// Something that happened on the relay outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayEvent {
    High(Relay),
    Low(Relay),
    AllLow,
}

/// In-memory relay outputs that log every write.
#[derive(Debug, Default)]
pub struct FakeRelays {
    extend: bool,
    retract: bool,
    pub events: Vec<RelayEvent>,
}

impl FakeRelays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self, relay: Relay) -> bool {
        match relay {
            Relay::Extend => self.extend,
            Relay::Retract => self.retract,
        }
    }

    /// Number of times `relay` was raised.
    pub fn pulses(&self, relay: Relay) -> usize {
        self.events
            .iter()
            .filter(|e| **e == RelayEvent::High(relay))
            .count()
    }

    fn set(&mut self, relay: Relay, high: bool) {
        match relay {
            Relay::Extend => self.extend = high,
            Relay::Retract => self.retract = high,
        }
    }
}

impl RelayHardware for FakeRelays {
    fn set_relay_high(&mut self, relay: Relay) {
        self.set(relay, true);
        self.events.push(RelayEvent::High(relay));
    }

    fn set_relay_low(&mut self, relay: Relay) {
        self.set(relay, false);
        self.events.push(RelayEvent::Low(relay));
    }

    fn deactivate_all_relays(&mut self) {
        self.extend = false;
        self.retract = false;
        self.events.push(RelayEvent::AllLow);
    }

    fn is_any_relay_active(&self) -> bool {
        self.extend || self.retract
    }
}

// =============================================================================
// Time
// =============================================================================

/// Simulated millisecond clock.
///
/// Clones share the same counter, so one copy can be handed to the controller
/// as its time source while another serves as the delay that advances it.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    nanos: Rc<Cell<u64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u32) -> Self {
        let clock = Self::new();
        clock.set(ms);
        clock
    }

    pub fn set(&self, ms: u32) {
        self.nanos.set(u64::from(ms) * 1_000_000);
    }

    pub fn advance(&self, ms: u32) {
        self.nanos.set(self.nanos.get() + u64::from(ms) * 1_000_000);
    }

    pub fn millis(&self) -> Millis {
        Millis((self.nanos.get() / 1_000_000) as u32)
    }
}

impl TimeSource for SimClock {
    fn now(&self) -> Millis {
        self.millis()
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.nanos.set(self.nanos.get() + u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms);
    }
}

// =============================================================================
// Motor
// =============================================================================

/// Call made on the motor interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCall {
    Start(Relay),
    Stop(Relay),
    Deactivate,
}

/// Motor interface that only records calls.
///
/// The log is shared so tests can inspect it after handing the motor over.
#[derive(Debug, Clone, Default)]
pub struct RecordingMotor {
    calls: Rc<RefCell<Vec<MotorCall>>>,
}

impl RecordingMotor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<MotorCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, call: MotorCall) -> usize {
        self.calls.borrow().iter().filter(|c| **c == call).count()
    }

    pub fn stop_pulses(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, MotorCall::Stop(_)))
            .count()
    }
}

impl MotorHardware for RecordingMotor {
    fn send_start_pulse(&mut self, relay: Relay) {
        self.calls.borrow_mut().push(MotorCall::Start(relay));
    }

    fn send_stop_pulse(&mut self, relay: Relay) {
        self.calls.borrow_mut().push(MotorCall::Stop(relay));
    }

    fn deactivate_relays(&mut self) {
        self.calls.borrow_mut().push(MotorCall::Deactivate);
    }
}

/// Tick `update` every `step_ms` from `from` until `until` (inclusive).
pub fn run_until<F: FnMut(Millis)>(from: u32, until: u32, step_ms: u32, mut tick: F) {
    let mut t = from;
    while t <= until {
        tick(Millis(t));
        t += step_ms;
    }
}
