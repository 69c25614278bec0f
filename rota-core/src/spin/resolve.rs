//! Winner resolution
//!
//! The marker is fixed at the top of the wheel. With segment 0 starting at
//! the top and the wheel rotated clockwise by `r` degrees, the marker
//! points at wheel angle `(360 - r mod 360) mod 360`, measured from the
//! start of segment 0.

use crate::layout::{Label, FULL_TURN};

/// Outcome of a completed spin
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinResult {
    /// Winning segment index
    pub index: usize,
    /// Winning segment label
    pub label: Label,
}

impl SpinResult {
    pub fn new(index: usize, label: Label) -> Self {
        Self { index, label }
    }
}

/// Reduce a rotation to `[0, 360)`
pub fn normalize_deg(rotation_deg: f64) -> f64 {
    let mut r = rotation_deg % FULL_TURN;
    if r < 0.0 {
        r += FULL_TURN;
    }
    // -tiny + 360 rounds up to 360
    if r >= FULL_TURN {
        r = 0.0;
    }
    r
}

/// Wheel angle under the top marker for a rotation
pub fn marker_angle(rotation_deg: f64) -> f64 {
    (FULL_TURN - normalize_deg(rotation_deg)) % FULL_TURN
}

/// Index of the segment under the marker
///
/// Returns `None` for an empty wheel or a non-positive segment angle.
/// A marker exactly on a boundary belongs to the segment that starts there.
pub fn resolve(rotation_deg: f64, segment_angle: f64, count: usize) -> Option<usize> {
    if count == 0 || !(segment_angle > 0.0) || !segment_angle.is_finite() {
        return None;
    }
    if !rotation_deg.is_finite() {
        return None;
    }

    let marker = marker_angle(rotation_deg);
    let index = (marker / segment_angle) as usize;

    Some(index % count)
}
