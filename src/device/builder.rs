//! Builder pattern for AwningDevice.

use embedded_hal::delay::DelayNs;

use crate::awning::AwningStateMachine;
use crate::config::{validate_config, AwningConfig, MotorTiming, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motor::{
    Detached, MotorControllerCore, MotorHardware, PositionTracker, PulseMotor, RelayHardware,
    TimeSource,
};
use crate::safety::WindMonitor;

use super::system::AwningDevice;

/// Builder for creating AwningDevice instances.
///
/// Starts out without a motor; [`motor`](Self::motor) or
/// [`pulse_motor`](Self::pulse_motor) attach one and change the builder's
/// motor type.
pub struct AwningDeviceBuilder<M = Detached>
where
    M: MotorHardware,
{
    awning: AwningConfig,
    timing: MotorTiming,
    motor: Option<M>,
}

impl Default for AwningDeviceBuilder<Detached> {
    fn default() -> Self {
        Self::new()
    }
}

impl AwningDeviceBuilder<Detached> {
    /// Create a new builder with firmware defaults.
    pub fn new() -> Self {
        Self {
            awning: AwningConfig::default(),
            timing: MotorTiming::default(),
            motor: None,
        }
    }
}

impl AwningDevice<Detached> {
    /// Create a device builder.
    pub fn builder() -> AwningDeviceBuilder<Detached> {
        AwningDeviceBuilder::new()
    }
}

impl<M> AwningDeviceBuilder<M>
where
    M: MotorHardware,
{
    /// Configure from a loaded SystemConfig.
    ///
    /// # Errors
    ///
    /// Returns an error if the timing table is invalid.
    pub fn from_config(mut self, config: &SystemConfig) -> Result<Self> {
        validate_config(config)?;
        self.awning = config.awning.clamped();
        self.timing = config.timing;
        Ok(self)
    }

    /// Set the full-travel time in milliseconds (clamped at build).
    pub fn travel_time(mut self, ms: u32) -> Self {
        self.awning.travel_time_ms = ms;
        self
    }

    /// Set the restored position in percent (clamped at build).
    pub fn position(mut self, position: f32) -> Self {
        self.awning.position = position;
        self
    }

    /// Set the wind threshold in pulses per minute (clamped at build).
    pub fn wind_threshold(mut self, threshold: u32) -> Self {
        self.awning.wind_threshold = threshold;
        self
    }

    /// Set the relay timing.
    pub fn timing(mut self, timing: MotorTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Attach a motor implementation.
    pub fn motor<N: MotorHardware>(self, motor: N) -> AwningDeviceBuilder<N> {
        AwningDeviceBuilder {
            awning: self.awning,
            timing: self.timing,
            motor: Some(motor),
        }
    }

    /// Attach a pulse motor driving `relays`, using the configured timing.
    pub fn pulse_motor<R, T, DELAY>(
        self,
        relays: R,
        clock: T,
        delay: DELAY,
    ) -> AwningDeviceBuilder<PulseMotor<R, T, DELAY>>
    where
        R: RelayHardware,
        T: TimeSource,
        DELAY: DelayNs,
    {
        let core = MotorControllerCore::with_timing(relays, clock, self.timing);
        self.motor(PulseMotor::new(core, delay))
    }

    /// Build the AwningDevice.
    ///
    /// # Errors
    ///
    /// Returns an error if no motor was attached.
    pub fn build(self) -> Result<AwningDevice<M>> {
        if self.motor.is_none() {
            return Err(Error::Config(ConfigError::MissingField("motor")));
        }
        Ok(self.assemble())
    }

    /// Build without requiring a motor.
    ///
    /// The state machine runs as pure logic when none was attached.
    pub fn build_detached(self) -> AwningDevice<M> {
        self.assemble()
    }

    fn assemble(self) -> AwningDevice<M> {
        let awning = self.awning.clamped();
        let tracker = PositionTracker::from_config(&awning);
        let machine = AwningStateMachine::new(tracker, self.motor)
            .with_update_interval(self.timing.update_interval_ms);
        let wind = WindMonitor::new(awning.wind_threshold).with_window(self.timing.wind_window_ms);

        debug!(
            "device: built at {} with travel {} ms",
            awning.position,
            awning.travel_time_ms
        );

        AwningDevice::new(machine, wind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awning::AwningState;
    use crate::motor::Relay;

    struct NullMotor;

    impl MotorHardware for NullMotor {
        fn send_start_pulse(&mut self, _relay: Relay) {}
        fn send_stop_pulse(&mut self, _relay: Relay) {}
        fn deactivate_relays(&mut self) {}
    }

    #[test]
    fn test_build_requires_motor() {
        let result = AwningDeviceBuilder::new().build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("motor")))
        ));
    }

    #[test]
    fn test_build_with_motor() {
        let device = AwningDeviceBuilder::new()
            .position(40.0)
            .travel_time(20_000)
            .wind_threshold(250)
            .motor(NullMotor)
            .build()
            .unwrap();

        assert_eq!(device.awning().state(), AwningState::Idle);
        assert_eq!(device.awning().current_position(), 40.0);
        assert_eq!(device.awning().target_position(), 40.0);
        assert_eq!(device.awning().tracker().travel_time_ms(), 20_000);
        assert_eq!(device.wind().threshold(), 250);
        assert!(device.awning().motor().is_some());
    }

    #[test]
    fn test_values_clamped_at_build() {
        let device = AwningDeviceBuilder::new()
            .position(-5.0)
            .travel_time(1)
            .wind_threshold(9_999)
            .build_detached();

        let snapshot = device.snapshot();
        assert_eq!(snapshot.position, 0.0);
        assert_eq!(snapshot.travel_time_ms, 5_000);
        assert_eq!(snapshot.wind_threshold, 1_000);
    }

    #[test]
    fn test_from_config_rejects_bad_timing() {
        let mut config = SystemConfig::default();
        config.timing.update_interval_ms = 0;

        assert!(AwningDeviceBuilder::new().from_config(&config).is_err());
    }
}
