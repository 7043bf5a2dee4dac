//! Error types for awning-control.
//!
//! The control core itself never fails: out-of-range input is clamped and
//! contended relay requests are dropped. Errors only surface while loading
//! configuration and while taking ownership of the relay GPIOs.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all awning-control operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Relay hardware error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Pulse length outside `1..=MAX_PULSE_MS`
    InvalidPulseDuration(u32),
    /// Settling time outside `1..=MAX_PULSE_MS`
    InvalidSettlingTime(u32),
    /// Position update interval of zero
    InvalidUpdateInterval(u32),
    /// Wind evaluation window of zero
    InvalidWindWindow(u32),
    /// Builder was missing a required part
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Relay hardware errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Pin operation failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidPulseDuration(v) => {
                write!(f, "Invalid pulse duration: {} ms. Must be 1-5000", v)
            }
            ConfigError::InvalidSettlingTime(v) => {
                write!(f, "Invalid relay settling time: {} ms. Must be 1-5000", v)
            }
            ConfigError::InvalidUpdateInterval(v) => {
                write!(f, "Invalid position update interval: {} ms. Must be > 0", v)
            }
            ConfigError::InvalidWindWindow(v) => {
                write!(f, "Invalid wind window: {} ms. Must be > 0", v)
            }
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
