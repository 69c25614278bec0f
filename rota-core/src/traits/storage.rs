//! Session storage abstractions
//!
//! Opaque key-value storage scoped to the current session. The engine
//! neither knows nor cares about the medium (browser `sessionStorage`,
//! a file, memory).

use alloc::vec::Vec;

/// Storage keys for persisted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Wheel settings (durations, palette, text)
    Settings = 1,
    /// Choice list with active flags
    Choices = 2,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(StorageKey::Settings),
            2 => Some(StorageKey::Choices),
            _ => None,
        }
    }

    /// Key name for string-keyed backends
    pub fn name(self) -> &'static str {
        match self {
            StorageKey::Settings => "rota.settings",
            StorageKey::Choices => "rota.choices",
        }
    }
}

/// Errors from session storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Nothing saved under this key
    NotFound,
    /// Storage backend is not reachable (disabled, private mode, ...)
    Unavailable,
    /// Backend rejected the operation (quota, encoding, ...)
    Backend,
}

/// Session key-value storage trait
///
/// `load` may legitimately report [`StoreError::NotFound`]; callers fall
/// back to defaults. `save` is fire-and-forget from the engine's point of
/// view: callers log and ignore failures.
pub trait SessionStore {
    /// Read the value stored under a key
    fn load(&mut self, key: StorageKey) -> Result<Vec<u8>, StoreError>;

    /// Write a value by key, replacing any previous value
    fn save(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StoreError>;
}
