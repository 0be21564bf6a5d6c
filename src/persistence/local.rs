//! Browser LocalStorage backend

use wasm_bindgen::JsValue;
use web_sys::Storage;

use super::{KeyValueStore, StorageError, StorageOp};

/// Window LocalStorage. Construction fails when the browser blocks storage.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

fn access_error(op: StorageOp, key: &str, err: JsValue) -> StorageError {
    StorageError::Access {
        op,
        key: key.to_string(),
        message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| access_error(StorageOp::Get, key, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| access_error(StorageOp::Set, key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| access_error(StorageOp::Remove, key, e))
    }
}
