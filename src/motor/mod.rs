//! Motor module for awning-control.
//!
//! Provides the relay pulse controller, its hardware seams and the
//! time-based position tracker.

mod driver;
mod hardware;
mod position;
mod pulse;
pub mod state;

pub use driver::MotorControllerCore;
pub use hardware::{PinRelays, RelayHardware, TimeSource};
pub use position::PositionTracker;
pub use pulse::{Detached, MotorHardware, PulseMotor, PULSE_POLL_INTERVAL_MS};
pub use state::{MotionDirection, OperationState, PulseState, Relay};
