//! In-memory store for native runs and tests

use std::collections::HashMap;

use super::{KeyValueStore, StorageError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    /// When set, every operation fails with this error
    failure: Option<StorageError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (or succeed again with `None`)
    pub fn fail_with(&mut self, error: Option<StorageError>) {
        self.failure = error;
    }

    fn check(&self) -> Result<(), StorageError> {
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), Ok(None));
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k"), Ok(Some("v".to_string())));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), Ok(None));
    }

    #[test]
    fn test_injected_failure() {
        let mut store = MemoryStore::new();
        store.fail_with(Some(StorageError::Quota("full".into())));
        assert_eq!(
            store.set("k", "v"),
            Err(StorageError::Quota("full".into()))
        );
        store.fail_with(None);
        assert!(store.set("k", "v").is_ok());
    }
}
