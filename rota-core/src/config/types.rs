//! Configuration type definitions
//!
//! These types represent the wheel configuration. Settings are persisted
//! through the session store as postcard-serialized binary data.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Maximum length of a CSS color string (e.g. `#7F7F7F`, `rgb(1,2,3)`)
pub const MAX_COLOR_LEN: usize = 24;

/// Maximum palette entries
pub const MAX_COLORS: usize = 8;

/// Default spin duration in seconds
pub const DEFAULT_SPIN_DURATION_S: f64 = 10.0;

/// Default initial speed (half of it is the revolution count)
pub const DEFAULT_INITIAL_SPEED: f64 = 10.0;

/// Default label font size in pixels
pub const DEFAULT_TEXT_SIZE_PX: f64 = 14.0;

/// Default label color
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";

/// Default segment palette
pub const DEFAULT_PALETTE: [&str; 4] = ["#000000", "#7F7F7F", "#333333", "#999999"];

/// Palette handed to the celebration collaborator when a spin finishes
pub const CELEBRATION_PALETTE: [&str; 6] = [
    "#EC0016", "#000000", "#333333", "#7F7F7F", "#999999", "#FFFFFF",
];

/// Minimum number of full revolutions per spin
pub const MIN_ROTATIONS: u32 = 2;

/// CSS color text
pub type Color = String<MAX_COLOR_LEN>;

/// Copy `text` into a bounded string, truncating at a character boundary
pub fn bounded_str<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Build a [`Color`] from CSS text
pub fn color(text: &str) -> Color {
    bounded_str(text)
}

fn default_palette() -> Vec<Color, MAX_COLORS> {
    DEFAULT_PALETTE.iter().map(|c| color(c)).collect()
}

/// Wheel configuration
///
/// All fields are plain parameters. Out-of-range values are not rejected
/// here; the spin engine derives safe quantities from them
/// (see [`WheelSettings::rotations`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelSettings {
    /// Spin duration in seconds
    pub spin_duration_s: f64,
    /// Initial speed; the spin makes `max(2, floor(speed / 2))` revolutions
    pub initial_speed: f64,
    /// Segment palette, applied cyclically
    pub colors: Vec<Color, MAX_COLORS>,
    /// Label font size in pixels
    pub text_size_px: f64,
    /// Label color
    pub text_color: Color,
    /// Rotating ticks skipped between renderer updates (0 = render every tick)
    pub frame_skip: u8,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            spin_duration_s: DEFAULT_SPIN_DURATION_S,
            initial_speed: DEFAULT_INITIAL_SPEED,
            colors: default_palette(),
            text_size_px: DEFAULT_TEXT_SIZE_PX,
            text_color: color(DEFAULT_TEXT_COLOR),
            frame_skip: 0,
        }
    }
}

impl WheelSettings {
    /// Number of full revolutions a spin makes
    ///
    /// `max(2, floor(initial_speed / 2))`. The float-to-int cast saturates,
    /// so negative and NaN speeds fall back to the minimum.
    pub fn rotations(&self) -> u32 {
        let half = (self.initial_speed / 2.0) as u32;
        half.max(MIN_ROTATIONS)
    }

    /// Spin duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.spin_duration_s * 1000.0
    }

    /// Palette color for a segment index
    ///
    /// Falls back to the default palette if the configured one is empty.
    pub fn color_for(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return color(DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]);
        }
        self.colors[index % self.colors.len()].clone()
    }

    /// Replace the palette from CSS color strings
    ///
    /// Extra entries beyond [`MAX_COLORS`] are ignored.
    pub fn set_colors<'a>(&mut self, colors: impl IntoIterator<Item = &'a str>) {
        self.colors.clear();
        for c in colors.into_iter().take(MAX_COLORS) {
            let _ = self.colors.push(color(c));
        }
    }
}
