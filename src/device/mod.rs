//! Device module for awning-control.
//!
//! Ties the state machine, the wind cutoff and the loop inputs together.

mod builder;
mod input;
mod system;

pub use builder::AwningDeviceBuilder;
pub use input::{ButtonAction, Command, DeviceInputs};
pub use system::{AwningDevice, PollOutcome};
