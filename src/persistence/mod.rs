//! Best-effort key/value persistence
//!
//! Values are stored as JSON strings. [`Save`] never surfaces an error to the
//! game: a failed read yields the fallback and a failed write is dropped.

#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage backend failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("write rejected: {0}")]
    Rejected(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value backend
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process backend (native runs and tests)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw string, bypassing JSON encoding
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .try_borrow_mut()
            .map_err(|_| StoreError::Unavailable)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON facade over a [`Storage`] backend
pub struct Save {
    backend: Box<dyn Storage>,
}

impl Save {
    pub fn new(backend: Box<dyn Storage>) -> Self {
        Self { backend }
    }

    /// Fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get_item(key)? {
            Some(json) if !json.is_empty() => Ok(Some(serde_json::from_str(&json)?)),
            _ => Ok(None),
        }
    }

    fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.backend.set_item(key, &json)
    }

    /// Read `key`, or `fallback` if it is missing or unreadable
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                log::warn!("Could not load {}: {}", key, e);
                fallback
            }
        }
    }

    /// Write `key`; failures are logged and dropped
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            log::warn!("Could not save {}: {}", key, e);
        }
    }
}
