//! Relay identifiers and motor state enums.

/// One of the two motor relays.
///
/// Each physical direction has its own relay; both must never be energized
/// at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Relay {
    /// Relay driving the motor towards 100 %.
    Extend,
    /// Relay driving the motor towards 0 %.
    Retract,
}

impl Relay {
    /// Both relays, extend first.
    pub const ALL: [Relay; 2] = [Relay::Extend, Relay::Retract];

    /// The relay driving the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Relay::Extend => Relay::Retract,
            Relay::Retract => Relay::Extend,
        }
    }

    /// Direction of travel a start pulse on this relay produces.
    #[inline]
    pub fn direction(self) -> MotionDirection {
        match self {
            Relay::Extend => MotionDirection::Extending,
            Relay::Retract => MotionDirection::Retracting,
        }
    }
}

/// Direction of estimated travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionDirection {
    /// Not moving.
    #[default]
    Idle,
    /// Moving towards 100 %.
    Extending,
    /// Moving towards 0 %.
    Retracting,
}

impl MotionDirection {
    /// Relay driving this direction, `None` for `Idle`.
    #[inline]
    pub fn relay(self) -> Option<Relay> {
        match self {
            MotionDirection::Idle => None,
            MotionDirection::Extending => Some(Relay::Extend),
            MotionDirection::Retracting => Some(Relay::Retract),
        }
    }
}

/// Pulse sub-state of the motor controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseState {
    /// Ready for a new pulse.
    #[default]
    Idle,
    /// Start pulse relay is energized.
    StartActive,
    /// Stop pulse relay is energized.
    StopActive,
    /// Relay dropped, waiting for the contacts to open.
    RelaySettling,
}

/// Logical running direction of the motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationState {
    /// Motor off.
    #[default]
    Idle,
    /// Motor latched extending.
    Extending,
    /// Motor latched retracting.
    Retracting,
}

impl OperationState {
    /// Operation state a start pulse on `relay` produces.
    #[inline]
    pub fn for_relay(relay: Relay) -> Self {
        match relay {
            Relay::Extend => OperationState::Extending,
            Relay::Retract => OperationState::Retracting,
        }
    }

    /// Whether the motor is logically running.
    #[inline]
    pub fn is_moving(self) -> bool {
        !matches!(self, OperationState::Idle)
    }
}
