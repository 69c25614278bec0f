//! Random offset sources

use rand::{Rng, RngCore};

/// Degrees in a full turn, as an integer draw bound
pub const FULL_TURN_DEG: u16 = 360;

/// Source of the random landing offset for a spin
///
/// Draws whole degrees uniformly from `[0, 360)`. Every [`RngCore`] is an
/// offset source; tests use [`FixedOffset`] to force an outcome.
pub trait OffsetSource {
    /// Draw an offset in whole degrees, `0 <= offset < 360`
    fn draw_offset(&mut self) -> u16;
}

impl<R: RngCore> OffsetSource for R {
    fn draw_offset(&mut self) -> u16 {
        self.gen_range(0..FULL_TURN_DEG)
    }
}

/// Offset source that always returns the same offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedOffset(pub u16);

impl OffsetSource for FixedOffset {
    fn draw_offset(&mut self) -> u16 {
        self.0 % FULL_TURN_DEG
    }
}
