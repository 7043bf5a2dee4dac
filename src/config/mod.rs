//! Configuration module for awning-control.
//!
//! Provides the persisted awning state, relay timing and the bounds every
//! value is clamped to. TOML loading is available with the `std` feature.

mod awning;
pub mod limits;
#[cfg(feature = "std")]
mod loader;
mod system;
mod timing;
pub mod units;
mod validation;

pub use awning::AwningConfig;
pub use system::SystemConfig;
pub use timing::MotorTiming;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{clamp_percent, Millis};
