//! Platform-agnostic core of the Rota wheel of fortune
//!
//! This crate contains all wheel logic that does not depend on a display
//! or a host environment:
//!
//! - Segment layout from a list of labels
//! - Spin engine (state machine, easing, time sampling)
//! - Winner resolution under the fixed top marker
//! - Choice list editing
//! - Configuration types and their persisted record format
//! - Collaborator traits (renderer, celebration, storage, clock, randomness)

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod choices;
pub mod config;
pub mod layout;
pub mod spin;
pub mod state;
pub mod traits;
pub mod wheel;

pub use choices::{Choice, ChoiceList};
pub use config::WheelSettings;
pub use layout::{Segment, SegmentSet};
pub use spin::{SpinPlan, SpinResult};
pub use wheel::{TickOutcome, Wheel};
