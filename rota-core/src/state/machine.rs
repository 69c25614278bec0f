//! Spin state machine definition
//!
//! Whether the wheel may start a spin, and what happens to an in-flight
//! spin, is a function of the current state and an event.

use super::events::Event;

/// Spin states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No spin in flight; a new spin may start
    #[default]
    Idle,
    /// A spin is animating toward its target rotation
    Spinning,
}

impl State {
    /// Check if a new spin may start from this state
    pub fn can_spin(&self) -> bool {
        matches!(self, State::Idle)
    }

    /// Check if a spin is in flight
    pub fn is_spinning(&self) -> bool {
        matches!(self, State::Spinning)
    }

    /// Process an event and return the next state
    ///
    /// Completion has no terminal state of its own: a finished spin drops
    /// straight back to `Idle` so the wheel is re-entrant.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Idle, Spin) => Spinning,

            (Spinning, Finished) => Idle,
            (Spinning, Cancel) => Idle,

            // Layout changes and explicit resets always land in Idle
            (_, Reset) => Idle,
            (_, LayoutChanged) => Idle,

            // A second spin request while spinning is ignored
            _ => self,
        }
    }
}
