//! Easing curve for spin deceleration

/// Weight of the extra slow-down term
const EXTRA_SLOWDOWN: f64 = 0.3;

/// Quintic ease-out with an extra slow-down near the end
///
/// Maps normalized time `t` in `[0, 1]` to normalized progress. Inputs
/// outside the range are clamped, NaN maps to 0. The curve is exact at the
/// endpoints: `f(0) = 0`, `f(1) = 1`.
pub fn ease_out_quint_extra_slow(t: f64) -> f64 {
    if !(t > 0.0) {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let inv = 1.0 - t;
    let base = 1.0 - inv * inv * inv * inv * inv;
    let extra = EXTRA_SLOWDOWN * t * t * t * (1.0 - base);

    base - extra
}
