//! Spin engine
//!
//! Owns the cumulative rotation and the spin state. A spin is planned up
//! front (target, duration) and then sampled against wall-clock time, so
//! the outcome does not depend on how often or how regularly it is ticked.

use crate::config::WheelSettings;
use crate::layout::FULL_TURN;
use crate::state::{Event, State};
use crate::traits::OffsetSource;

use super::easing::ease_out_quint_extra_slow;

/// Parameters of one spin, fixed when it starts
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinPlan {
    /// Identifies this spin among all spins of the engine
    pub id: u32,
    /// Cumulative rotation when the spin started
    pub start_rotation: f64,
    /// Cumulative rotation the spin ends on
    pub target_rotation: f64,
    /// Full revolutions included in the travel
    pub rotations: u32,
    /// Random landing offset in whole degrees
    pub offset_deg: u16,
    /// Timestamp of the spin start
    pub started_at_ms: f64,
    /// Animation length
    pub duration_ms: f64,
}

impl SpinPlan {
    /// Total travel in degrees
    pub fn travel_deg(&self) -> f64 {
        self.target_rotation - self.start_rotation
    }

    /// Elapsed time since start, never negative
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        let elapsed = now_ms - self.started_at_ms;
        if elapsed > 0.0 {
            elapsed
        } else {
            0.0
        }
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.is_complete(now_ms) {
            return 1.0;
        }
        self.elapsed_ms(now_ms) / self.duration_ms
    }

    /// Check if the animation time has run out
    ///
    /// Zero, negative and NaN durations are complete immediately.
    pub fn is_complete(&self, now_ms: f64) -> bool {
        !(self.elapsed_ms(now_ms) < self.duration_ms)
    }

    /// Rotation to display at `now_ms`
    pub fn rotation_at(&self, now_ms: f64) -> f64 {
        if self.is_complete(now_ms) {
            return self.target_rotation;
        }
        let eased = ease_out_quint_extra_slow(self.progress(now_ms));
        self.start_rotation + self.travel_deg() * eased
    }
}

/// One animation sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sample {
    /// No spin in flight
    Idle,
    /// Spin in flight, display this rotation
    Rotating(f64),
    /// Spin just completed on this exact rotation
    Finished(f64),
}

/// Spin engine
#[derive(Debug, Clone, Default)]
pub struct SpinEngine {
    /// Cumulative rotation, only changes when a spin ends
    current_rotation: f64,
    state: State,
    plan: Option<SpinPlan>,
    /// Spins started so far, source of plan ids
    spins_started: u32,
}

impl SpinEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a spin
    ///
    /// Returns `None` without touching any state when the wheel has no
    /// segments or a spin is already in flight.
    pub fn start<S>(
        &mut self,
        segment_count: usize,
        settings: &WheelSettings,
        now_ms: f64,
        source: &mut S,
    ) -> Option<SpinPlan>
    where
        S: OffsetSource + ?Sized,
    {
        if segment_count == 0 || !self.state.can_spin() {
            return None;
        }

        let rotations = settings.rotations();
        let offset_deg = source.draw_offset();
        let target_rotation =
            self.current_rotation + rotations as f64 * FULL_TURN + offset_deg as f64;

        self.spins_started = self.spins_started.wrapping_add(1);

        let plan = SpinPlan {
            id: self.spins_started,
            start_rotation: self.current_rotation,
            target_rotation,
            rotations,
            offset_deg,
            started_at_ms: now_ms,
            duration_ms: settings.duration_ms(),
        };

        self.plan = Some(plan);
        self.state = self.state.transition(Event::Spin);

        Some(plan)
    }

    /// Sample the in-flight spin at `now_ms`
    ///
    /// The sample that crosses the duration snaps the cumulative rotation
    /// to the target and returns the engine to idle.
    pub fn sample(&mut self, now_ms: f64) -> Sample {
        let plan = match (self.state, self.plan) {
            (State::Spinning, Some(plan)) => plan,
            _ => return Sample::Idle,
        };

        if plan.is_complete(now_ms) {
            self.current_rotation = plan.target_rotation;
            self.plan = None;
            self.state = self.state.transition(Event::Finished);
            return Sample::Finished(plan.target_rotation);
        }

        Sample::Rotating(plan.rotation_at(now_ms))
    }

    /// Finish the in-flight spin without resolving a winner
    ///
    /// The wheel jumps to the target. Returns `true` if a spin was cancelled.
    pub fn cancel(&mut self) -> bool {
        let Some(plan) = self.plan.take() else {
            return false;
        };
        self.current_rotation = plan.target_rotation;
        self.state = self.state.transition(Event::Cancel);
        true
    }

    /// Drop any spin and return to rotation 0
    pub fn reset(&mut self) {
        self.restart(Event::Reset);
    }

    /// Drop any spin after the segments were rebuilt
    ///
    /// Angles of the old layout mean nothing for the new one, so the
    /// rotation returns to 0 as well.
    pub fn relayout(&mut self) {
        self.restart(Event::LayoutChanged);
    }

    fn restart(&mut self, event: Event) {
        self.plan = None;
        self.current_rotation = 0.0;
        self.state = self.state.transition(event);
    }

    /// Cumulative rotation
    pub fn current_rotation(&self) -> f64 {
        self.current_rotation
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    /// The in-flight spin, if any
    pub fn plan(&self) -> Option<&SpinPlan> {
        self.plan.as_ref()
    }

    /// Id of the in-flight spin
    pub fn active_spin(&self) -> Option<u32> {
        self.plan.map(|p| p.id)
    }

    /// Target of the in-flight spin
    pub fn target_rotation(&self) -> Option<f64> {
        self.plan.map(|p| p.target_rotation)
    }
}
