//! `window.localStorage` backend

use super::{KeyValueStore, StorageError};

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

fn describe(err: wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(describe(e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Browsers report a full store as a thrown QuotaExceededError
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Quota(describe(e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Backend(describe(e)))
    }
}
