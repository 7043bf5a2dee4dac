//! # awning-control
//!
//! Pulse-driven awning motor control with embedded-hal 1.0 support.
//!
//! The awning motor has no position sensor. It is started and stopped by
//! short pulses on one of two relays (extend or retract), and its position is
//! estimated from how long it has been running.
//!
//! ## Features
//!
//! - **Time-based tracking**: position integrated from elapsed time and a
//!   calibrated full-travel time
//! - **Pulse interlock**: only one relay pulse at a time, with a settling
//!   period before the relays may be driven again
//! - **No idle drift correction**: an idle awning never restarts on its own
//! - **Wind cutoff**: automatic retract when the anemometer rate is too high
//! - **no_std compatible**: the core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use awning_control::{AwningDevice, DeviceInputs, Command, Millis, PinRelays};
//!
//! let config = awning_control::load_config("awning.toml")?;
//! let relays = PinRelays::new(extend_pin, retract_pin)?;
//!
//! let mut device = AwningDevice::builder()
//!     .from_config(&config)?
//!     .pulse_motor(relays, clock, delay)
//!     .build()?;
//!
//! loop {
//!     let outcome = device.poll(clock.now(), DeviceInputs::command(Command::Open));
//!     if outcome.persist {
//!         save(device.snapshot());
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Logging shim, must come first so the macros are visible everywhere
#[macro_use]
mod fmt;

// Core modules
pub mod awning;
pub mod config;
pub mod device;
pub mod error;
pub mod motor;
pub mod safety;

// Re-exports for ergonomic API
pub use awning::{AwningState, AwningStateMachine};
pub use config::{validate_config, AwningConfig, MotorTiming, SystemConfig};
pub use device::{AwningDevice, AwningDeviceBuilder, ButtonAction, Command, DeviceInputs, PollOutcome};
pub use error::{Error, Result};
pub use motor::{
    state, Detached, MotorControllerCore, MotorHardware, PinRelays, PositionTracker, PulseMotor,
    RelayHardware, TimeSource,
};
pub use motor::{MotionDirection, OperationState, PulseState, Relay};
pub use safety::WindMonitor;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{clamp_percent, Millis};
