//! Awning state.

use crate::motor::{MotionDirection, Relay};

/// What the awning is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AwningState {
    /// Stationary; waiting for a command.
    #[default]
    Idle,
    /// Moving towards 100 %.
    Extending,
    /// Moving towards 0 %.
    Retracting,
}

impl AwningState {
    /// Whether the awning is moving.
    #[inline]
    pub fn is_moving(self) -> bool {
        !matches!(self, AwningState::Idle)
    }

    /// Tracker direction for this state.
    #[inline]
    pub fn direction(self) -> MotionDirection {
        match self {
            AwningState::Idle => MotionDirection::Idle,
            AwningState::Extending => MotionDirection::Extending,
            AwningState::Retracting => MotionDirection::Retracting,
        }
    }

    /// Relay driving this state, `None` while idle.
    #[inline]
    pub fn relay(self) -> Option<Relay> {
        self.direction().relay()
    }

    /// Get the state name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            AwningState::Idle => "Idle",
            AwningState::Extending => "Extending",
            AwningState::Retracting => "Retracting",
        }
    }
}

impl From<MotionDirection> for AwningState {
    fn from(direction: MotionDirection) -> Self {
        match direction {
            MotionDirection::Idle => AwningState::Idle,
            MotionDirection::Extending => AwningState::Extending,
            MotionDirection::Retracting => AwningState::Retracting,
        }
    }
}
