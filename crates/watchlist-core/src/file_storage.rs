use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{KeyValueStorage, StorageError};

/// Key-value storage backed by a single JSON object on disk.
///
/// Every call re-reads the file so edits made by other tools are picked up.
/// Writes go to a temp file that is renamed over the original. A file that no
/// longer parses is copied to `*.json.bak` and treated as empty.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            debug!("Storage miss: {:?} (file does not exist)", self.path);
            return Ok(Map::new());
        }

        // Raw bytes so that invalid UTF-8 takes the same path as bad JSON
        let content = std::fs::read(&self.path)?;
        if content.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => {
                warn!(
                    "Storage file {:?} does not hold a JSON object (found {}). Starting empty.",
                    self.path,
                    json_kind(&other)
                );
                self.backup_corrupt_file();
                Ok(Map::new())
            }
            Err(e) => {
                warn!("Storage corruption detected in {:?}: {}. Starting empty.", self.path, e);
                self.backup_corrupt_file();
                Ok(Map::new())
            }
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(map)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!("Storage saved: {:?} ({} keys)", self.path, map.len());
        Ok(())
    }

    fn backup_corrupt_file(&self) {
        let backup_path = self.path.with_extension("json.bak");
        match std::fs::copy(&self.path, &backup_path) {
            Ok(_) => info!("Backed up unreadable storage file to {:?}", backup_path),
            Err(e) => warn!("Failed to back up unreadable storage file: {}", e),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value);
        self.write_all(&map)
    }

    fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        let mut map = self.read_all()?;
        let existed = map.remove(key).is_some();
        if existed {
            self.write_all(&map)?;
        }
        Ok(existed)
    }
}
