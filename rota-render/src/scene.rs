//! Retained wheel scene
//!
//! A [`Scene`] is the complete visual state of the wheel: slices, labels,
//! rotation and winner mark. It implements [`Renderer`], so the engine
//! draws into it; a host then copies whatever changed to the real output
//! and marks the scene clean.

use rota_core::config::WheelSettings;
use rota_core::layout::SegmentSet;
use rota_core::traits::{Origin, Renderer};

use crate::geometry::{slice_path, wheel_transform, LabelPlacement};

/// One drawn segment
#[derive(Debug, Clone, PartialEq)]
pub struct SliceView {
    /// Segment index
    pub index: usize,
    /// SVG path data
    pub path: String,
    /// Fill color
    pub fill: String,
    /// Label text
    pub label: String,
    /// Label position
    pub placement: LabelPlacement,
}

/// What changed since the scene was last marked clean
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    /// Slices or placeholder must be redrawn
    pub layout: bool,
    /// Wheel rotation changed
    pub rotation: bool,
    /// Winner mark changed
    pub winner: bool,
}

impl Changes {
    pub fn any(&self) -> bool {
        self.layout || self.rotation || self.winner
    }
}

/// Retained wheel scene
#[derive(Debug, Clone)]
pub struct Scene {
    slices: Vec<SliceView>,
    placeholder: bool,
    text_size_px: f64,
    text_color: String,
    rotation_deg: f64,
    winner: Option<usize>,
    origin: Origin,
    changes: Changes,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene showing the placeholder
    pub fn new() -> Self {
        Self {
            slices: Vec::new(),
            placeholder: true,
            text_size_px: 0.0,
            text_color: String::new(),
            rotation_deg: 0.0,
            winner: None,
            origin: Origin::CENTER,
            changes: Changes {
                layout: true,
                rotation: true,
                winner: true,
            },
        }
    }

    pub fn slices(&self) -> &[SliceView] {
        &self.slices
    }

    /// Whether the "no choices" placeholder is shown instead of a wheel
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Label font size in pixels
    pub fn text_size_px(&self) -> f64 {
        self.text_size_px
    }

    /// Label color
    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    /// CSS `transform` for the wheel element
    pub fn transform(&self) -> String {
        wheel_transform(self.rotation_deg)
    }

    /// Marked winner, if any
    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    /// Set where the wheel sits on screen, as reported to the celebration
    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    /// Pending changes
    pub fn changes(&self) -> Changes {
        self.changes
    }

    /// Check if anything needs to be redrawn
    pub fn is_dirty(&self) -> bool {
        self.changes.any()
    }

    /// Take the pending changes and mark the scene clean
    pub fn take_changes(&mut self) -> Changes {
        core::mem::take(&mut self.changes)
    }
}

impl Renderer for Scene {
    fn rebuild(&mut self, segments: &SegmentSet, settings: &WheelSettings) {
        self.slices = segments
            .iter()
            .map(|segment| SliceView {
                index: segment.index,
                path: slice_path(segment.start_deg, segment.end_deg),
                fill: segment.color.as_str().to_string(),
                label: segment.label.as_str().to_string(),
                placement: LabelPlacement::at(segment.mid_deg()),
            })
            .collect();
        self.placeholder = self.slices.is_empty();
        self.text_size_px = settings.text_size_px;
        self.text_color = settings.text_color.as_str().to_string();
        self.winner = None;
        self.changes.layout = true;
        self.changes.winner = true;
    }

    fn show_placeholder(&mut self) {
        self.slices.clear();
        self.placeholder = true;
        self.winner = None;
        self.changes.layout = true;
        self.changes.winner = true;
    }

    fn rotate(&mut self, rotation_deg: f64) {
        if self.rotation_deg != rotation_deg {
            self.rotation_deg = rotation_deg;
            self.changes.rotation = true;
        }
    }

    fn highlight_winner(&mut self, index: Option<usize>) {
        let index = index.filter(|i| *i < self.slices.len());
        if self.winner != index {
            self.winner = index;
            self.changes.winner = true;
        }
    }

    fn origin(&self) -> Origin {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::traits::{FixedOffset, NoCelebration};
    use rota_core::wheel::{TickOutcome, Wheel};

    fn settings() -> WheelSettings {
        let mut settings = WheelSettings {
            initial_speed: 4.0,
            spin_duration_s: 1.0,
            text_size_px: 20.0,
            ..WheelSettings::default()
        };
        settings.set_colors(["#EC0016", "#000000"]);
        settings
    }

    #[test]
    fn test_new_scene_is_placeholder() {
        let scene = Scene::new();
        assert!(scene.is_placeholder());
        assert!(scene.is_dirty());
        assert_eq!(scene.transform(), "rotate(0deg)");
    }

    #[test]
    fn test_rebuild_from_layout() {
        let mut scene = Scene::new();
        let mut wheel = Wheel::new(settings());
        wheel.set_labels(["A", "B", "C", "D"], &mut scene);

        assert!(!scene.is_placeholder());
        assert_eq!(scene.slices().len(), 4);
        assert_eq!(scene.text_size_px(), 20.0);
        assert_eq!(scene.text_color(), "#FFFFFF");

        let first = &scene.slices()[0];
        assert_eq!(first.label, "A");
        assert_eq!(first.fill, "#EC0016");
        assert_eq!(first.path, "M 50,50 L 50,0 A 50,50 0 0 1 100,50 Z");
        assert_eq!(scene.slices()[1].fill, "#000000");
        assert_eq!(scene.slices()[2].fill, "#EC0016");
    }

    #[test]
    fn test_changes_tracked() {
        let mut scene = Scene::new();
        let mut wheel = Wheel::new(settings());
        wheel.set_labels(["A", "B"], &mut scene);

        let changes = scene.take_changes();
        assert!(changes.layout);
        assert!(!scene.is_dirty());

        // Same rotation is not a change
        scene.rotate(0.0);
        assert!(!scene.is_dirty());

        scene.rotate(12.5);
        assert_eq!(
            scene.take_changes(),
            Changes {
                rotation: true,
                ..Changes::default()
            }
        );
    }

    #[test]
    fn test_winner_marked_after_spin() {
        let mut scene = Scene::new();
        let mut wheel = Wheel::new(settings());
        wheel.set_labels(["A", "B", "C", "D"], &mut scene);
        wheel.spin(0.0, &mut FixedOffset(0), &mut scene).unwrap();
        scene.take_changes();

        let outcome = wheel.tick(1000.0, &mut scene, &mut NoCelebration);
        assert!(matches!(outcome, TickOutcome::Finished(ref r) if r.index == 0));

        assert_eq!(scene.winner(), Some(0));
        assert_eq!(scene.rotation_deg(), 720.0);
        let changes = scene.take_changes();
        assert!(changes.winner && changes.rotation && !changes.layout);
    }

    #[test]
    fn test_empty_labels_show_placeholder() {
        let mut scene = Scene::new();
        let mut wheel = Wheel::new(settings());
        wheel.set_labels(["A"], &mut scene);
        wheel.set_labels(["  "], &mut scene);

        assert!(scene.is_placeholder());
        assert!(scene.slices().is_empty());
        assert_eq!(scene.winner(), None);
    }

    #[test]
    fn test_out_of_range_winner_ignored() {
        let mut scene = Scene::new();
        scene.highlight_winner(Some(3));
        assert_eq!(scene.winner(), None);
    }

    #[test]
    fn test_origin_forwarded() {
        let mut scene = Scene::new();
        scene.set_origin(Origin::new(0.3, 0.4));
        assert_eq!(Renderer::origin(&scene), Origin::new(0.3, 0.4));
    }
}
