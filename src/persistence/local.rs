//! Browser LocalStorage backend

use super::{Storage, StoreError};

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// `None` when storage is disabled (private mode, sandboxed iframe)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|_| StoreError::Unavailable)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}
