//! Time sources
//!
//! Spins are driven by wall-clock elapsed time, never by tick count. Hosts
//! inject the clock so tests can script exact timestamps.

use core::future::Future;

/// Monotonic millisecond clock
pub trait Clock {
    /// Current time in milliseconds
    ///
    /// Only differences between readings are meaningful.
    fn now_ms(&self) -> f64;
}

/// Display refresh source
///
/// Resolves once per display refresh with that frame's timestamp, on the
/// same time base as [`Clock::now_ms`]. Frame spacing is not assumed to be
/// regular.
pub trait FrameSource: Clock {
    /// Wait for the next frame
    fn next_frame(&mut self) -> impl Future<Output = f64>;
}
