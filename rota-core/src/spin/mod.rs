//! Spin animation and resolution
//!
//! - [`engine`]: cumulative rotation, spin planning and time sampling
//! - [`easing`]: deceleration curve
//! - [`resolve`]: rotation to winning segment
//! - [`driver`]: async frame loop

pub mod driver;
pub mod easing;
pub mod engine;
pub mod resolve;

pub use driver::{drive, spin_and_drive, Ticker, WheelTicker};
pub use easing::ease_out_quint_extra_slow;
pub use engine::{Sample, SpinEngine, SpinPlan};
pub use resolve::{marker_angle, normalize_deg, resolve, SpinResult};
