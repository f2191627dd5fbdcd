use serde_json::Value;
use std::collections::HashMap;

use crate::StorageError;

/// The host's key-value persistence API.
///
/// Values are JSON documents; a store owns exactly one key.
pub trait KeyValueStorage: Send {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Returns whether the key was present.
    fn remove(&mut self, key: &str) -> Result<bool, StorageError>;

    fn get_or(&self, key: &str, default: Value) -> Result<Value, StorageError> {
        Ok(self.get(key)?.unwrap_or(default))
    }
}

/// In-process storage, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: Value) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.to_string(), value);
        storage
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        Ok(self.values.remove(key).is_some())
    }
}
