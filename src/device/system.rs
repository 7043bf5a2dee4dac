//! Top-level device owner.
//!
//! One `AwningDevice` owns the state machine, its tracker and motor, and the
//! wind monitor. The board's main loop calls [`AwningDevice::poll`] once per
//! iteration and persists [`AwningDevice::snapshot`] when asked to.

use crate::awning::{AwningState, AwningStateMachine};
use crate::config::limits::{MAX_POSITION, MIN_POSITION};
use crate::config::units::Millis;
use crate::config::AwningConfig;
use crate::motor::{Detached, MotorHardware, Relay};
use crate::safety::WindMonitor;

use super::input::{ButtonAction, Command, DeviceInputs};

/// Result of one control-loop tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    /// State after the tick.
    pub state: AwningState,
    /// Motion ended or a setting changed; the snapshot should be saved.
    pub persist: bool,
    /// A button was acted on (network command was ignored).
    pub button_pressed: bool,
    /// The wind cutoff sent the awning towards fully retracted and it is moving.
    pub wind_retract: bool,
}

/// The awning controller as a whole.
///
/// Input priority within a tick:
/// 1. buttons (a pressed button discards the network command of that tick)
/// 2. network command
/// 3. wind cutoff
/// 4. state machine update
pub struct AwningDevice<M = Detached>
where
    M: MotorHardware,
{
    /// Command and decision layer.
    awning: AwningStateMachine<M>,

    /// Wind cutoff.
    wind: WindMonitor,
}

impl<M> AwningDevice<M>
where
    M: MotorHardware,
{
    /// Assemble a device from its parts.
    pub fn new(awning: AwningStateMachine<M>, wind: WindMonitor) -> Self {
        Self { awning, wind }
    }

    /// Run one control-loop tick.
    pub fn poll(&mut self, now: Millis, inputs: DeviceInputs) -> PollOutcome {
        let was_moving = self.awning.is_moving();
        let mut persist = false;

        let extend_pressed = self.handle_button(Relay::Extend, inputs.extend_button);
        let retract_pressed = self.handle_button(Relay::Retract, inputs.retract_button);
        let button_pressed = extend_pressed || retract_pressed;

        if let Some(command) = inputs.command {
            if button_pressed {
                debug!("device: command {} ignored, button has priority", command);
            } else {
                persist |= self.apply_command(command);
            }
        }

        if let Some(total) = inputs.wind_pulses {
            self.wind.update(now, total);
        }
        let wind_retract = self.handle_wind();

        self.awning.update(now);

        if was_moving && !self.awning.is_moving() {
            persist = true;
        }

        PollOutcome {
            state: self.awning.state(),
            persist,
            button_pressed,
            wind_retract,
        }
    }

    /// Values to persist across reboots.
    pub fn snapshot(&self) -> AwningConfig {
        AwningConfig {
            travel_time_ms: self.awning.tracker().travel_time_ms(),
            position: self.awning.current_position(),
            wind_threshold: self.wind.threshold(),
        }
    }

    /// Get the state machine.
    #[inline]
    pub fn awning(&self) -> &AwningStateMachine<M> {
        &self.awning
    }

    /// Get the state machine mutably.
    #[inline]
    pub fn awning_mut(&mut self) -> &mut AwningStateMachine<M> {
        &mut self.awning
    }

    /// Get the wind monitor.
    #[inline]
    pub fn wind(&self) -> &WindMonitor {
        &self.wind
    }

    /// Get the wind monitor mutably.
    #[inline]
    pub fn wind_mut(&mut self) -> &mut WindMonitor {
        &mut self.wind
    }

    fn handle_button(&mut self, button: Relay, action: ButtonAction) -> bool {
        match action {
            ButtonAction::None => false,
            ButtonAction::ShortPress => {
                info!("device: {} button short press, stopping", button);
                self.awning.stop_both();
                true
            }
            ButtonAction::LongPress => {
                let target = match button {
                    Relay::Extend => MAX_POSITION,
                    Relay::Retract => MIN_POSITION,
                };
                info!("device: {} button long press, moving to {}", button, target);
                self.awning.set_target(target);
                true
            }
        }
    }

    /// Returns whether a persisted setting changed.
    fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::Open => self.awning.set_target(MAX_POSITION),
            Command::Close => self.awning.set_target(MIN_POSITION),
            Command::Stop => {
                let relay = self.awning.last_movement_relay();
                self.awning.stop(relay);
            }
            Command::SetPosition(position) => self.awning.set_target(position),
            Command::Calibrate(travel_time_ms) => {
                self.awning.tracker_mut().set_travel_time(travel_time_ms);
                info!(
                    "device: travel time calibrated to {} ms",
                    self.awning.tracker().travel_time_ms()
                );
                return true;
            }
            Command::SetWindThreshold(threshold) => {
                self.wind.set_threshold(threshold);
                info!("device: wind threshold set to {}", self.wind.threshold());
                return true;
            }
        }
        false
    }

    fn handle_wind(&mut self) -> bool {
        if !self.wind.is_triggered() || self.awning.current_position() <= MIN_POSITION {
            return false;
        }

        self.awning.set_target(MIN_POSITION);
        // Within tolerance of retracted: nothing moved, the trigger stays armed.
        if !self.awning.is_moving() {
            return false;
        }

        warn!("device: wind cutoff, retracting");
        self.wind.reset_trigger();
        true
    }
}
