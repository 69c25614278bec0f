//! Wheel drawing model for Rota
//!
//! This crate turns a [`rota_core::layout::SegmentSet`] into drawable
//! geometry:
//! - `geometry`: SVG slice paths, label placement and CSS transforms
//! - `scene`: a retained [`Scene`] implementing the core `Renderer` trait,
//!   with change tracking so hosts only touch what changed
//!
//! Hosts (the browser front end, snapshot tests) read the scene and apply
//! it to their own output.

pub mod geometry;
pub mod scene;

pub use geometry::{slice_path, wheel_transform, LabelPlacement};
pub use scene::{Changes, Scene, SliceView};
