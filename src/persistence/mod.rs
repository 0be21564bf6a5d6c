//! Key/value persistence
//!
//! Everything the site keeps between page loads goes through [`KeyValueStore`]:
//! - LocalStorage on web (`LocalStore`)
//! - In-memory map for native runs and tests (`MemoryStore`)
//!
//! Callers treat failures as "nothing saved": errors are logged, never surfaced.

use std::fmt;

mod memory;
pub use memory::MemoryStore;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage operation, used for error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Get,
    Set,
    Remove,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Set => write!(f, "set"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Errors from a storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No backing store (no window, storage disabled by the browser)
    Unavailable,
    /// The backend rejected an operation (quota, security error)
    Access {
        op: StorageOp,
        key: String,
        message: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Access { op, key, message } => {
                write!(f, "storage {op} failed for key '{key}': {message}")
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Minimal string key/value store (LocalStorage shaped)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read a value, folding errors into `None` (logged)
pub fn read_or_none<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

/// Write a value, logging failures. Returns whether the write landed.
pub fn write_or_warn<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("{e}");
            false
        }
    }
}

/// Remove a value, logging failures
pub fn remove_or_warn<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) {
    if let Err(e) = store.remove(key) {
        log::warn!("{e}");
    }
}
