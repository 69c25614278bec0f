//! Collaborator traits
//!
//! These traits define the interface between the spin engine and the
//! host: drawing, celebration, storage, time, and randomness.

pub mod clock;
pub mod random;
pub mod renderer;
pub mod storage;

pub use clock::{Clock, FrameSource};
pub use random::{FixedOffset, OffsetSource, FULL_TURN_DEG};
pub use renderer::{Celebration, NoCelebration, Origin, Renderer};
pub use storage::{SessionStore, StorageKey, StoreError};
