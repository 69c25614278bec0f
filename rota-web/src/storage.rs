//! `sessionStorage` backed session store
//!
//! Records are binary, so they are kept base64 encoded under the key's
//! name (`rota.settings`, `rota.choices`).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rota_core::traits::{SessionStore, StorageKey, StoreError};
use web_sys::{Storage, Window};

/// Browser session storage
pub struct BrowserSessionStore {
    storage: Option<Storage>,
}

impl BrowserSessionStore {
    /// Open the window's session storage
    ///
    /// Storage can be missing (sandboxed frames, disabled storage); every
    /// operation then reports [`StoreError::Unavailable`].
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.session_storage().ok().flatten(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl SessionStore for BrowserSessionStore {
    fn load(&mut self, key: StorageKey) -> Result<Vec<u8>, StoreError> {
        let raw = self
            .storage()?
            .get_item(key.name())
            .map_err(|_| StoreError::Backend)?
            .ok_or(StoreError::NotFound)?;
        if raw.is_empty() {
            return Err(StoreError::NotFound);
        }

        STANDARD
            .decode(raw.as_bytes())
            .map_err(|_| StoreError::Backend)
    }

    fn save(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StoreError> {
        let raw = STANDARD.encode(data);
        self.storage()?
            .set_item(key.name(), &raw)
            .map_err(|_| StoreError::Backend)
    }
}
