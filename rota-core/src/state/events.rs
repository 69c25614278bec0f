//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Caller events
    /// Caller requested a spin
    Spin,
    /// Caller reset the wheel to rotation 0
    Reset,
    /// Active labels or settings changed and the layout was rebuilt
    LayoutChanged,

    // Engine events
    /// Elapsed time reached the spin duration
    Finished,
    /// In-flight spin was abandoned without resolving a winner
    Cancel,
}

impl Event {
    /// Check if this event is issued by the caller
    pub fn is_caller_event(&self) -> bool {
        matches!(self, Event::Spin | Event::Reset | Event::LayoutChanged)
    }

    /// Check if this event ends an in-flight spin
    pub fn ends_spin(&self) -> bool {
        matches!(
            self,
            Event::Finished | Event::Cancel | Event::Reset | Event::LayoutChanged
        )
    }
}
