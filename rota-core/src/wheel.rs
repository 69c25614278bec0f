//! Wheel facade
//!
//! Ties together settings, layout and the spin engine, and pushes every
//! visible change to the renderer. Hosts talk to this type only.

use crate::config::{WheelSettings, CELEBRATION_PALETTE};
use crate::layout::{Label, SegmentSet};
use crate::spin::{Sample, SpinEngine, SpinPlan, SpinResult};
use crate::state::State;
use crate::traits::{Celebration, OffsetSource, Renderer};

use alloc::vec::Vec;

/// Result of one animation tick
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing in flight (never spun, finished earlier, or cancelled)
    Idle,
    /// Spin in flight at this display rotation
    Rotating(f64),
    /// Spin completed on this tick
    Finished(SpinResult),
}

/// Wheel of fortune
pub struct Wheel {
    /// Current settings
    settings: WheelSettings,
    /// Current layout
    segments: SegmentSet,
    /// Spin engine
    engine: SpinEngine,
    /// Most recent completed spin
    last_result: Option<SpinResult>,
    /// Rotating ticks seen in the current spin, for frame skip
    rotating_ticks: u32,
}

impl Wheel {
    /// Create an empty wheel
    pub fn new(settings: WheelSettings) -> Self {
        Self {
            settings,
            segments: SegmentSet::empty(),
            engine: SpinEngine::new(),
            last_result: None,
            rotating_ticks: 0,
        }
    }

    /// Replace the labels
    ///
    /// Cancels any spin in flight without a result and resets the rotation.
    pub fn set_labels<I, S, R>(&mut self, labels: I, renderer: &mut R)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: Renderer + ?Sized,
    {
        self.segments = SegmentSet::layout(labels, &self.settings);
        self.refresh(renderer);
    }

    /// Replace the settings and re-lay out the current labels
    pub fn update_settings<R>(&mut self, settings: WheelSettings, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        self.settings = settings;

        let labels: Vec<Label> = self.segments.iter().map(|s| s.label.clone()).collect();
        self.segments = SegmentSet::layout(&labels, &self.settings);
        self.refresh(renderer);
    }

    /// Start a spin
    ///
    /// Returns `None` when the wheel is empty or already spinning.
    pub fn spin<S, R>(
        &mut self,
        now_ms: f64,
        source: &mut S,
        renderer: &mut R,
    ) -> Option<SpinPlan>
    where
        S: OffsetSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let plan = self
            .engine
            .start(self.segments.len(), &self.settings, now_ms, source)?;

        self.rotating_ticks = 0;
        renderer.highlight_winner(None);

        Some(plan)
    }

    /// Advance the animation to `now_ms`
    pub fn tick<R, C>(
        &mut self,
        now_ms: f64,
        renderer: &mut R,
        celebration: &mut C,
    ) -> TickOutcome
    where
        R: Renderer + ?Sized,
        C: Celebration + ?Sized,
    {
        match self.engine.sample(now_ms) {
            Sample::Idle => TickOutcome::Idle,
            Sample::Rotating(rotation) => {
                let stride = self.settings.frame_skip as u32 + 1;
                if self.rotating_ticks % stride == 0 {
                    renderer.rotate(rotation);
                }
                self.rotating_ticks = self.rotating_ticks.wrapping_add(1);
                TickOutcome::Rotating(rotation)
            }
            Sample::Finished(rotation) => {
                renderer.rotate(rotation);

                let Some(result) = self.segments.winner(rotation) else {
                    // Layout is non-empty for any started spin
                    return TickOutcome::Idle;
                };

                renderer.highlight_winner(Some(result.index));
                celebration.celebrate(renderer.origin(), &CELEBRATION_PALETTE);
                self.last_result = Some(result.clone());

                TickOutcome::Finished(result)
            }
        }
    }

    /// Advance the animation to `now_ms` for one particular spin
    ///
    /// Returns [`TickOutcome::Idle`] without touching the wheel once the spin
    /// `spin_id` is no longer in flight, even if a newer spin is.
    pub fn tick_spin<R, C>(
        &mut self,
        spin_id: u32,
        now_ms: f64,
        renderer: &mut R,
        celebration: &mut C,
    ) -> TickOutcome
    where
        R: Renderer + ?Sized,
        C: Celebration + ?Sized,
    {
        if self.engine.active_spin() != Some(spin_id) {
            return TickOutcome::Idle;
        }
        self.tick(now_ms, renderer, celebration)
    }

    /// Finish the spin in flight without picking a winner
    ///
    /// Returns `true` if a spin was cancelled.
    pub fn cancel<R>(&mut self, renderer: &mut R) -> bool
    where
        R: Renderer + ?Sized,
    {
        if !self.engine.cancel() {
            return false;
        }
        renderer.rotate(self.engine.current_rotation());
        true
    }

    /// Return to rotation 0, dropping any spin in flight
    pub fn reset<R>(&mut self, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        self.engine.reset();
        self.rotating_ticks = 0;
        renderer.highlight_winner(None);
        renderer.rotate(0.0);
    }

    /// Most recent completed spin
    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn segments(&self) -> &SegmentSet {
        &self.segments
    }

    /// Cumulative rotation
    pub fn current_rotation(&self) -> f64 {
        self.engine.current_rotation()
    }

    pub fn state(&self) -> State {
        self.engine.state()
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    /// Id of the spin in flight
    pub fn active_spin(&self) -> Option<u32> {
        self.engine.active_spin()
    }

    /// Rebuild the drawing after a layout change
    fn refresh<R>(&mut self, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        self.engine.relayout();
        self.last_result = None;
        self.rotating_ticks = 0;

        if self.segments.is_empty() {
            renderer.show_placeholder();
        } else {
            renderer.rebuild(&self.segments, &self.settings);
        }
        renderer.highlight_winner(None);
        renderer.rotate(0.0);
    }
}
