//! Key/value persistence
//!
//! Features:
//! - One small trait shared by the leaderboard and settings
//! - LocalStorage backend on web, in-memory backend elsewhere
//! - Failures are reported as [`StorageError`]; callers log and fall back

#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

use std::fmt;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;

/// Why a storage operation failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage is available (private mode, no window, ...)
    Unavailable,
    /// The write did not fit
    Quota(String),
    /// Any other backend failure
    Backend(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Quota(msg) => write!(f, "storage quota exceeded: {msg}"),
            StorageError::Backend(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
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
