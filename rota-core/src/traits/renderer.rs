//! Renderer and celebration traits
//!
//! The renderer is a one-way consumer of layout and rotation. The engine
//! never reads anything back from it except the on-screen origin that is
//! forwarded to the celebration collaborator.

use crate::config::WheelSettings;
use crate::layout::SegmentSet;

/// A point in viewport space, as fractions of the viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Origin {
    /// Horizontal position (0.0 = left edge, 1.0 = right edge)
    pub x: f64,
    /// Vertical position (0.0 = top edge, 1.0 = bottom edge)
    pub y: f64,
}

impl Origin {
    /// Center of the viewport
    pub const CENTER: Origin = Origin { x: 0.5, y: 0.5 };

    /// Create an origin from viewport fractions
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Trait for the wheel's visual representation
///
/// Implementations own all drawing. Drawing failures are the renderer's
/// business and must not leak back into spin state, so none of these
/// methods return errors.
pub trait Renderer {
    /// Redraw every segment
    ///
    /// Called whenever the layout or the settings change. The whole previous
    /// drawing is discarded.
    fn rebuild(&mut self, segments: &SegmentSet, settings: &WheelSettings);

    /// Show the "no choices" placeholder instead of a wheel
    fn show_placeholder(&mut self);

    /// Apply a rotation (degrees, cumulative) to the whole wheel
    fn rotate(&mut self, rotation_deg: f64);

    /// Mark the winning segment, or clear the mark with `None`
    fn highlight_winner(&mut self, index: Option<usize>);

    /// Where the wheel sits on screen
    fn origin(&self) -> Origin {
        Origin::CENTER
    }
}

/// Trait for the winner celebration effect
///
/// Purely cosmetic. Invoked exactly once per completed spin.
pub trait Celebration {
    /// Play the celebration from `origin` using `palette` (CSS colors)
    fn celebrate(&mut self, origin: Origin, palette: &[&str]);
}

/// Celebration that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn celebrate(&mut self, _origin: Origin, _palette: &[&str]) {}
}
