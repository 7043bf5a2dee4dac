//! System configuration - root configuration structure.

use serde::{Deserialize, Serialize};

use super::awning::AwningConfig;
use super::timing::MotorTiming;

/// Root configuration structure from TOML.
///
/// Both tables are optional; an empty document yields the firmware defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemConfig {
    /// Persisted awning state and calibration.
    #[serde(default)]
    pub awning: AwningConfig,

    /// Relay pulse timing.
    #[serde(default)]
    pub timing: MotorTiming,
}

impl SystemConfig {
    /// Replace the persisted part, keeping timing.
    pub fn with_awning(mut self, awning: AwningConfig) -> Self {
        self.awning = awning.clamped();
        self
    }
}
