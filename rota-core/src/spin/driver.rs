//! Async spin driver
//!
//! Feeds frame timestamps into a [`Ticker`] until the spin ends. This is
//! the host-facing animation loop: it suspends between frames and holds no
//! state of its own beyond the ticker.
//!
//! A [`WheelTicker`] is bound to the spin it was created for. If that spin
//! is cancelled and another one starts before the next frame, the old loop
//! ends with `None` instead of ticking the new spin.

use crate::traits::{Celebration, FrameSource, OffsetSource, Renderer};
use crate::wheel::{TickOutcome, Wheel};

use super::resolve::SpinResult;

/// One step of the animation loop
pub trait Ticker {
    /// Advance to `now_ms`
    fn tick(&mut self, now_ms: f64) -> TickOutcome;
}

/// [`Ticker`] over a wheel and its collaborators, for one spin
pub struct WheelTicker<'a, R: ?Sized, C: ?Sized> {
    /// Id of the spin this ticker drives
    pub spin: u32,
    pub wheel: &'a mut Wheel,
    pub renderer: &'a mut R,
    pub celebration: &'a mut C,
}

impl<'a, R, C> WheelTicker<'a, R, C>
where
    R: Renderer + ?Sized,
    C: Celebration + ?Sized,
{
    pub fn new(
        spin: u32,
        wheel: &'a mut Wheel,
        renderer: &'a mut R,
        celebration: &'a mut C,
    ) -> Self {
        Self {
            spin,
            wheel,
            renderer,
            celebration,
        }
    }
}

impl<R, C> Ticker for WheelTicker<'_, R, C>
where
    R: Renderer + ?Sized,
    C: Celebration + ?Sized,
{
    fn tick(&mut self, now_ms: f64) -> TickOutcome {
        self.wheel
            .tick_spin(self.spin, now_ms, self.renderer, self.celebration)
    }
}

/// Run the animation loop to the end of the current spin
///
/// Returns the result on completion, or `None` if the ticker's spin is not
/// in flight or was cancelled before finishing.
pub async fn drive<F, T>(frames: &mut F, ticker: &mut T) -> Option<SpinResult>
where
    F: FrameSource + ?Sized,
    T: Ticker + ?Sized,
{
    loop {
        let now_ms = frames.next_frame().await;
        match ticker.tick(now_ms) {
            TickOutcome::Rotating(_) => {}
            TickOutcome::Finished(result) => return Some(result),
            TickOutcome::Idle => return None,
        }
    }
}

/// Start a spin and drive it to completion
///
/// Returns `None` immediately if the wheel refuses to spin.
pub async fn spin_and_drive<F, S, R, C>(
    wheel: &mut Wheel,
    frames: &mut F,
    source: &mut S,
    renderer: &mut R,
    celebration: &mut C,
) -> Option<SpinResult>
where
    F: FrameSource + ?Sized,
    S: OffsetSource + ?Sized,
    R: Renderer + ?Sized,
    C: Celebration + ?Sized,
{
    let plan = wheel.spin(frames.now_ms(), source, renderer)?;

    let mut ticker = WheelTicker::new(plan.id, wheel, renderer, celebration);
    drive(frames, &mut ticker).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelSettings;
    use crate::layout::SegmentSet;
    use crate::spin::SpinPlan;
    use crate::traits::{Clock, FixedOffset, NoCelebration, Origin};
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use embassy_futures::block_on;
    use std::vec::Vec;

    /// Frames from a fixed timestamp script
    struct ScriptedFrames {
        times: Vec<f64>,
        next: usize,
    }

    impl ScriptedFrames {
        fn new(times: &[f64]) -> Self {
            Self {
                times: times.to_vec(),
                next: 0,
            }
        }
    }

    impl Clock for ScriptedFrames {
        fn now_ms(&self) -> f64 {
            0.0
        }
    }

    impl FrameSource for ScriptedFrames {
        async fn next_frame(&mut self) -> f64 {
            let t = self.times.get(self.next).copied().unwrap_or(f64::MAX);
            self.next += 1;
            t
        }
    }

    #[derive(Default)]
    struct Recorder {
        rotations: Vec<f64>,
        highlighted: Option<usize>,
        celebrations: usize,
    }

    impl Renderer for Recorder {
        fn rebuild(&mut self, _segments: &SegmentSet, _settings: &WheelSettings) {}
        fn show_placeholder(&mut self) {}
        fn rotate(&mut self, rotation_deg: f64) {
            self.rotations.push(rotation_deg);
        }
        fn highlight_winner(&mut self, index: Option<usize>) {
            self.highlighted = index;
        }
    }

    struct Counter(usize);

    impl Celebration for Counter {
        fn celebrate(&mut self, _origin: Origin, _palette: &[&str]) {
            self.0 += 1;
        }
    }

    fn wheel() -> Wheel {
        let settings = WheelSettings {
            initial_speed: 4.0,
            spin_duration_s: 1.0,
            ..WheelSettings::default()
        };
        let mut wheel = Wheel::new(settings);
        wheel.set_labels(["A", "B", "C", "D"], &mut Recorder::default());
        wheel
    }

    #[test]
    fn test_drive_to_completion() {
        let mut wheel = wheel();
        let mut renderer = Recorder::default();
        let mut celebration = Counter(0);
        let mut frames = ScriptedFrames::new(&[16.0, 400.0, 800.0, 1000.0, 1016.0]);

        let result = block_on(spin_and_drive(
            &mut wheel,
            &mut frames,
            &mut FixedOffset(0),
            &mut renderer,
            &mut celebration,
        ));

        let result = result.unwrap();
        assert_eq!(result.index, 0);
        assert_eq!(result.label.as_str(), "A");
        assert_eq!(celebration.0, 1);
        assert_eq!(renderer.highlighted, Some(0));
        assert_eq!(renderer.rotations.last(), Some(&720.0));
        // Stopped at the completing frame
        assert_eq!(frames.next, 4);
    }

    #[test]
    fn test_refused_spin_returns_none() {
        let mut wheel = Wheel::new(WheelSettings::default());
        let mut frames = ScriptedFrames::new(&[16.0]);

        let result = block_on(spin_and_drive(
            &mut wheel,
            &mut frames,
            &mut FixedOffset(0),
            &mut Recorder::default(),
            &mut NoCelebration,
        ));

        assert!(result.is_none());
        assert_eq!(frames.next, 0);
    }

    #[test]
    fn test_drive_without_spin_is_idle() {
        let mut wheel = wheel();
        let mut renderer = Recorder::default();
        let mut celebration = NoCelebration;
        let mut frames = ScriptedFrames::new(&[16.0]);
        let mut ticker = WheelTicker::new(1, &mut wheel, &mut renderer, &mut celebration);

        assert!(block_on(drive(&mut frames, &mut ticker)).is_none());
    }

    /// Ticker that cancels the wheel after a number of frames
    struct CancelAfter<'a> {
        inner: WheelTicker<'a, Recorder, NoCelebration>,
        frames_left: usize,
    }

    impl Ticker for CancelAfter<'_> {
        fn tick(&mut self, now_ms: f64) -> TickOutcome {
            if self.frames_left == 0 {
                self.inner.wheel.cancel(self.inner.renderer);
            } else {
                self.frames_left -= 1;
            }
            self.inner.tick(now_ms)
        }
    }

    #[test]
    fn test_cancelled_spin_returns_none() {
        let mut wheel = wheel();
        let mut renderer = Recorder::default();
        let mut celebration = NoCelebration;
        let mut frames = ScriptedFrames::new(&[16.0, 32.0, 48.0, 64.0]);

        let plan = wheel.spin(0.0, &mut FixedOffset(0), &mut renderer).unwrap();
        let mut ticker = CancelAfter {
            inner: WheelTicker::new(plan.id, &mut wheel, &mut renderer, &mut celebration),
            frames_left: 2,
        };

        assert!(block_on(drive(&mut frames, &mut ticker)).is_none());
        assert!(wheel.last_result().is_none());
    }

    /// Wheel and renderer shared between several animation loops
    struct Host {
        wheel: Wheel,
        renderer: Recorder,
    }

    /// Ticker that borrows the shared host for one tick at a time
    struct SharedTicker {
        host: Rc<RefCell<Host>>,
        spin: u32,
    }

    impl Ticker for SharedTicker {
        fn tick(&mut self, now_ms: f64) -> TickOutcome {
            let mut host = self.host.borrow_mut();
            let host = &mut *host;
            host.wheel
                .tick_spin(self.spin, now_ms, &mut host.renderer, &mut NoCelebration)
        }
    }

    fn start(host: &Rc<RefCell<Host>>, now_ms: f64) -> SpinPlan {
        let mut host = host.borrow_mut();
        let host = &mut *host;
        host.wheel
            .spin(now_ms, &mut FixedOffset(0), &mut host.renderer)
            .unwrap()
    }

    #[test]
    fn test_cancelled_spin_loop_does_not_take_next_result() {
        let host = Rc::new(RefCell::new(Host {
            wheel: wheel(),
            renderer: Recorder::default(),
        }));

        let first = start(&host, 0.0);
        let mut old_loop = SharedTicker {
            host: host.clone(),
            spin: first.id,
        };

        {
            let mut guard = host.borrow_mut();
            let h = &mut *guard;
            h.wheel.set_labels(["A", "B", "C", "D"], &mut h.renderer);
        }

        let second = start(&host, 5.0);
        let mut new_loop = SharedTicker {
            host: host.clone(),
            spin: second.id,
        };
        let rotations_before = host.borrow().renderer.rotations.len();

        // The old loop gets the frame first and must leave the new spin alone
        let mut frames = ScriptedFrames::new(&[2000.0]);
        assert!(block_on(drive(&mut frames, &mut old_loop)).is_none());
        assert!(host.borrow().wheel.is_spinning());
        assert_eq!(host.borrow().renderer.rotations.len(), rotations_before);
        assert!(host.borrow().wheel.last_result().is_none());

        let mut frames = ScriptedFrames::new(&[2000.0]);
        let result = block_on(drive(&mut frames, &mut new_loop)).unwrap();
        assert_eq!(result.index, 0);
        assert_eq!(result.label.as_str(), "A");
        assert_eq!(host.borrow().wheel.last_result(), Some(&result));
        assert_eq!(host.borrow().renderer.highlighted, Some(0));
    }
}
