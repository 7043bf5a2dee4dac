//! Hardware seams: relay outputs and the millisecond clock.
//!
//! The pulse controller only talks to these traits, so it runs unchanged on a
//! board, in a simulator or against test fakes.

use embedded_hal::digital::OutputPin;

use crate::config::units::Millis;
use crate::error::{MotorError, Result};

use super::state::Relay;

/// Relay outputs of the motor unit.
pub trait RelayHardware {
    /// Energize `relay`.
    fn set_relay_high(&mut self, relay: Relay);

    /// De-energize `relay`.
    fn set_relay_low(&mut self, relay: Relay);

    /// De-energize both relays.
    fn deactivate_all_relays(&mut self);

    /// Whether either relay is currently energized.
    fn is_any_relay_active(&self) -> bool;
}

/// Monotonic millisecond counter. May wrap.
pub trait TimeSource {
    /// Current timestamp.
    fn now(&self) -> Millis;
}

impl<T: RelayHardware + ?Sized> RelayHardware for &mut T {
    fn set_relay_high(&mut self, relay: Relay) {
        (**self).set_relay_high(relay)
    }

    fn set_relay_low(&mut self, relay: Relay) {
        (**self).set_relay_low(relay)
    }

    fn deactivate_all_relays(&mut self) {
        (**self).deactivate_all_relays()
    }

    fn is_any_relay_active(&self) -> bool {
        (**self).is_any_relay_active()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Millis {
        (**self).now()
    }
}

/// [`RelayHardware`] over two embedded-hal output pins.
///
/// `OutputPin` has no read-back, so the energized relay is tracked here.
/// Raising one relay always lowers the other first. A failed pin write is
/// logged and answered by driving both pins low.
pub struct PinRelays<EXT, RET>
where
    EXT: OutputPin,
    RET: OutputPin,
{
    /// Extend relay pin (high = energized).
    extend_pin: EXT,

    /// Retract relay pin (high = energized).
    retract_pin: RET,

    /// Relay currently driven high, if any.
    active: Option<Relay>,
}

impl<EXT, RET> PinRelays<EXT, RET>
where
    EXT: OutputPin,
    RET: OutputPin,
{
    /// Take ownership of the relay pins and drive both low.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::PinError` if either pin cannot be driven low.
    pub fn new(mut extend_pin: EXT, mut retract_pin: RET) -> Result<Self> {
        extend_pin.set_low().map_err(|_| MotorError::PinError)?;
        retract_pin.set_low().map_err(|_| MotorError::PinError)?;

        Ok(Self {
            extend_pin,
            retract_pin,
            active: None,
        })
    }

    /// Relay currently driven high, if any.
    #[inline]
    pub fn active(&self) -> Option<Relay> {
        self.active
    }

    /// Give the pins back.
    pub fn release(self) -> (EXT, RET) {
        (self.extend_pin, self.retract_pin)
    }

    fn drive(&mut self, relay: Relay, high: bool) -> core::result::Result<(), MotorError> {
        match relay {
            Relay::Extend => set_pin(&mut self.extend_pin, high),
            Relay::Retract => set_pin(&mut self.retract_pin, high),
        }
    }

    fn force_all_low(&mut self) {
        // Nothing more can be done if a pin refuses to go low.
        let _ = self.extend_pin.set_low();
        let _ = self.retract_pin.set_low();
        self.active = None;
    }
}

fn set_pin<P: OutputPin>(pin: &mut P, high: bool) -> core::result::Result<(), MotorError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| MotorError::PinError)
}

impl<EXT, RET> RelayHardware for PinRelays<EXT, RET>
where
    EXT: OutputPin,
    RET: OutputPin,
{
    fn set_relay_high(&mut self, relay: Relay) {
        let other = relay.opposite();
        if self.active == Some(other) {
            if self.drive(other, false).is_err() {
                warn!("relay {}: pin write failed, forcing all low", other);
                self.force_all_low();
                return;
            }
            self.active = None;
        }

        match self.drive(relay, true) {
            Ok(()) => self.active = Some(relay),
            Err(_) => {
                warn!("relay {}: pin write failed, forcing all low", relay);
                self.force_all_low();
            }
        }
    }

    fn set_relay_low(&mut self, relay: Relay) {
        if self.drive(relay, false).is_err() {
            warn!("relay {}: pin write failed, forcing all low", relay);
            self.force_all_low();
            return;
        }
        if self.active == Some(relay) {
            self.active = None;
        }
    }

    fn deactivate_all_relays(&mut self) {
        self.force_all_low();
    }

    fn is_any_relay_active(&self) -> bool {
        self.active.is_some()
    }
}
