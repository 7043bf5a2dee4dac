//! Awning module for awning-control.
//!
//! Provides the state machine arbitrating commands against the position
//! estimate.

mod machine;
mod state;

pub use machine::AwningStateMachine;
pub use state::AwningState;
