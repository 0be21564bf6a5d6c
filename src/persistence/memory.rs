//! In-memory storage backend

use std::collections::HashMap;

use super::{KeyValueStore, StorageError, StorageOp};

/// HashMap-backed store. `failing()` builds one that rejects every call.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a single pre-populated entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Store whose every operation fails (quota/security errors)
    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail: true,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn check(&self, op: StorageOp, key: &str) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Access {
                op,
                key: key.to_string(),
                message: "backend rejected the operation".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check(StorageOp::Get, key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(StorageOp::Set, key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check(StorageOp::Remove, key)?;
        self.entries.remove(key);
        Ok(())
    }
}
