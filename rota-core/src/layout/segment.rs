//! Wheel segments generated from labels

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::config::{Color, WheelSettings};
use crate::spin::resolve::{resolve, SpinResult};

/// Angle where segment 0 begins (top of the circle, screen coordinates)
pub const START_OFFSET_DEG: f64 = 270.0;

/// Degrees in a full turn
pub const FULL_TURN: f64 = 360.0;

/// Segment label text
pub type Label = String;

/// A single wheel segment
///
/// Angles are in degrees and increase clockwise on screen. Spans are
/// half-open: `[start_deg, end_deg)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// Position on the wheel (0-based)
    pub index: usize,
    /// Label text
    pub label: Label,
    /// Start angle
    pub start_deg: f64,
    /// End angle
    pub end_deg: f64,
    /// Fill color
    pub color: Color,
}

impl Segment {
    /// Angular width
    pub fn sweep_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    /// Angle halfway through the span, where the label sits
    pub fn mid_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg() / 2.0
    }
}

/// Ordered, non-blank segments laid out around the wheel
///
/// Rebuilt from scratch whenever the active labels change.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentSet {
    segments: Vec<Segment>,
}

impl SegmentSet {
    /// The empty layout; never spinnable
    pub const fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Lay out labels around the wheel
    ///
    /// Blank and whitespace-only labels are dropped, the rest are trimmed
    /// and keep their order.
    pub fn layout<I, S>(labels: I, settings: &WheelSettings) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kept: Vec<Label> = labels
            .into_iter()
            .filter_map(|label| {
                let label = label.as_ref().trim();
                (!label.is_empty()).then(|| label.to_string())
            })
            .collect();

        if kept.is_empty() {
            return Self::empty();
        }

        let angle = FULL_TURN / kept.len() as f64;
        let segments = kept
            .into_iter()
            .enumerate()
            .map(|(index, label)| Segment {
                index,
                label,
                start_deg: START_OFFSET_DEG + index as f64 * angle,
                end_deg: START_OFFSET_DEG + (index + 1) as f64 * angle,
                color: settings.color_for(index),
            })
            .collect();

        Self { segments }
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check for the empty layout
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Angular width shared by every segment (`360 / count`)
    pub fn segment_angle(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(FULL_TURN / self.len() as f64)
        }
    }

    /// Get a segment by index
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Label of a segment by index
    pub fn label(&self, index: usize) -> Option<&str> {
        self.get(index).map(|s| s.label.as_str())
    }

    /// Iterate over segments in wheel order
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Iterate over labels in wheel order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.label.as_str())
    }

    /// Segment under the top marker for a finished rotation
    pub fn winner(&self, rotation_deg: f64) -> Option<SpinResult> {
        let angle = self.segment_angle()?;
        let index = resolve(rotation_deg, angle, self.len())?;
        let segment = self.get(index)?;
        Some(SpinResult::new(index, segment.label.clone()))
    }
}
