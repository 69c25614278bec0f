//! Segment layout
//!
//! Uniform partition of the wheel into labeled segments, starting at the
//! top and proceeding clockwise.

pub mod segment;

pub use segment::{Label, Segment, SegmentSet, FULL_TURN, START_OFFSET_DEG};
