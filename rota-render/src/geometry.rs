//! Slice and label geometry
//!
//! Each segment is drawn as a pie slice in its own `0 0 100 100` SVG
//! viewbox, centered at (50, 50) with radius 50. Angles are degrees in
//! screen coordinates (0 = right, 90 = down).

use std::fmt::Write;

/// Side of the square viewbox
pub const VIEWBOX: f64 = 100.0;

/// Center coordinate on both axes
pub const CENTER: f64 = 50.0;

/// Slice radius
pub const RADIUS: f64 = 50.0;

/// Label distance from the center, in percent of the radius
pub const LABEL_RADIUS_PCT: f64 = 60.0;

/// Point on the circle of `radius` at `angle_deg`
pub fn polar(angle_deg: f64, radius: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (CENTER + radius * rad.cos(), CENTER + radius * rad.sin())
}

/// Format a coordinate with at most three decimals
///
/// Keeps path strings short and stable across float noise.
pub fn coord(value: f64) -> String {
    // + 0.0 folds -0 into 0
    let rounded = (value * 1000.0).round() / 1000.0 + 0.0;
    format!("{}", rounded)
}

/// SVG path data for the slice between two angles
///
/// A slice spanning the whole circle (single segment wheels) is drawn as
/// two half arcs, since an arc with equal end points renders nothing.
pub fn slice_path(start_deg: f64, end_deg: f64) -> String {
    let sweep = end_deg - start_deg;
    let (x1, y1) = polar(start_deg, RADIUS);
    let mut d = String::new();

    if sweep >= 360.0 {
        let (xm, ym) = polar(start_deg + 180.0, RADIUS);
        let _ = write!(
            d,
            "M {},{} A {r},{r} 0 1 1 {},{} A {r},{r} 0 1 1 {},{} Z",
            coord(x1),
            coord(y1),
            coord(xm),
            coord(ym),
            coord(x1),
            coord(y1),
            r = coord(RADIUS),
        );
        return d;
    }

    let (x2, y2) = polar(end_deg, RADIUS);
    let large_arc = if sweep > 180.0 { 1 } else { 0 };
    let _ = write!(
        d,
        "M {c},{c} L {},{} A {r},{r} 0 {} 1 {},{} Z",
        coord(x1),
        coord(y1),
        large_arc,
        coord(x2),
        coord(y2),
        c = coord(CENTER),
        r = coord(RADIUS),
    );
    d
}

/// Position of a segment label
///
/// `left_pct`/`top_pct` place the label's center within the wheel box;
/// the label is turned to read along its segment's bisector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub left_pct: f64,
    pub top_pct: f64,
    pub rotation_deg: f64,
}

impl LabelPlacement {
    /// Place a label on the bisector at `mid_deg`
    pub fn at(mid_deg: f64) -> Self {
        let rad = mid_deg.to_radians();
        Self {
            left_pct: CENTER + LABEL_RADIUS_PCT * rad.cos() / 2.0,
            top_pct: CENTER + LABEL_RADIUS_PCT * rad.sin() / 2.0,
            rotation_deg: mid_deg,
        }
    }

    /// CSS `left`
    pub fn left(&self) -> String {
        format!("{}%", coord(self.left_pct))
    }

    /// CSS `top`
    pub fn top(&self) -> String {
        format!("{}%", coord(self.top_pct))
    }

    /// CSS `transform`
    pub fn transform(&self) -> String {
        format!("translate(-50%, -50%) rotate({}deg)", coord(self.rotation_deg))
    }
}

/// CSS `transform` rotating the whole wheel
pub fn wheel_transform(rotation_deg: f64) -> String {
    format!("rotate({}deg)", rotation_deg)
}
