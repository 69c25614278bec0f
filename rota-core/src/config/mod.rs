//! Configuration types
//!
//! Wheel settings and the record format used to persist them (and the
//! choice list) through a session store as postcard binary data.

pub mod persisted;
pub mod types;

pub use persisted::*;
pub use types::*;
