//! Key-Value Storage
//!
//! Pluggable storage backend behind a fixed get/set/remove capability
//! interface.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{SessionError, StorageError};

/// Key-value storage interface (for dependency injection).
///
/// Absence of a key is `Ok(None)`, never an error. Each single get/set/remove
/// is assumed atomic per key; the backend owns that guarantee.
pub trait KeyValueStorage: Send + Sync {
    /// Get the value stored under a key.
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Store a value under a key, overwriting any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove a key. No-op if absent.
    fn remove_item(&self, key: &str) -> Result<(), SessionError>;
}

/// In-memory key-value storage implementation.
pub struct InMemoryKeyValueStorage {
    items: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStorage {
    /// Create new in-memory storage.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }
}

impl Default for InMemoryKeyValueStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorage for InMemoryKeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        let items = self.items.lock().unwrap();
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Mock key-value storage for testing.
#[derive(Default)]
pub struct MockKeyValueStorage {
    items: Mutex<HashMap<String, String>>,
    get_history: Mutex<Vec<String>>,
    set_history: Mutex<Vec<(String, String)>>,
    remove_history: Mutex<Vec<String>>,
    next_error: Mutex<Option<SessionError>>,
    should_fail: Mutex<bool>,
}

impl MockKeyValueStorage {
    /// Create new mock storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set next error to return.
    pub fn set_next_error(&self, error: SessionError) -> &Self {
        *self.next_error.lock().unwrap() = Some(error);
        self
    }

    /// Set storage to fail all operations.
    pub fn set_should_fail(&self, should_fail: bool) -> &Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    /// Pre-populate a value.
    pub fn add_item(&self, key: &str, value: &str) -> &Self {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Get history of read keys.
    pub fn get_get_history(&self) -> Vec<String> {
        self.get_history.lock().unwrap().clone()
    }

    /// Get history of written key/value pairs.
    pub fn get_set_history(&self) -> Vec<(String, String)> {
        self.set_history.lock().unwrap().clone()
    }

    /// Get history of removed keys.
    pub fn get_remove_history(&self) -> Vec<String> {
        self.remove_history.lock().unwrap().clone()
    }

    fn check_error(&self) -> Result<(), SessionError> {
        if *self.should_fail.lock().unwrap() {
            return Err(SessionError::Storage(StorageError::Unavailable {
                message: "Mock storage failure".to_string(),
            }));
        }

        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }

        Ok(())
    }
}

impl KeyValueStorage for MockKeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.check_error()?;

        self.get_history.lock().unwrap().push(key.to_string());
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.check_error()?;

        self.set_history
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.check_error()?;

        self.remove_history.lock().unwrap().push(key.to_string());
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Create in-memory storage.
pub fn create_in_memory_storage() -> InMemoryKeyValueStorage {
    InMemoryKeyValueStorage::new()
}

/// Create mock storage for testing.
pub fn create_mock_storage() -> MockKeyValueStorage {
    MockKeyValueStorage::new()
}
