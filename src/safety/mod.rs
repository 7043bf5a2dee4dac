//! Safety monitoring
//!
//! Automatic cutoffs that override the requested position.

mod wind;

pub use wind::WindMonitor;
