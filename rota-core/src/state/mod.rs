//! Spin state machine
//!
//! The state machine is explicit, finite, and deterministic. It is the sole
//! re-entrancy guard: at most one spin is in flight at a time.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
