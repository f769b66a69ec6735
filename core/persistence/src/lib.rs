//! FILENAME: core/persistence/src/lib.rs
//! Admin Console Persistence Module
//!
//! A small key/value store for UI arrangement data (column order, hidden
//! columns). Values are JSON documents. Two backends:
//! - `MemoryStore`: process-local, for tests and ephemeral sessions
//! - `JsonFileStore`: one JSON object on disk, written through on every change

mod error;

pub use error::PersistenceError;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// STORE INTERFACE
// ============================================================================

/// String-keyed store of JSON values.
pub trait KeyValueStore {
    fn get_value(&self, key: &str) -> Option<Value>;

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), PersistenceError>;

    /// Removes a key. Returns whether it was present.
    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError>;

    fn keys(&self) -> Vec<String>;

    fn contains(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Reads and deserializes a value. A stored value of the wrong shape is an
    /// error; an absent key is `Ok(None)`.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistenceError>
    where
        Self: Sized,
    {
        match self.get_value(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PersistenceError>
    where
        Self: Sized,
    {
        let json = serde_json::to_value(value)?;
        self.set_value(key, json)
    }
}

// ============================================================================
// IN-MEMORY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

// ============================================================================
// JSON FILE
// ============================================================================

/// A store backed by a single JSON object file.
///
/// The whole file is rewritten on every mutation (via a sibling temp file and
/// a rename), so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; the file
    /// is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str::<Value>(&text)? {
                    Value::Object(map) => map.into_iter().collect(),
                    other => {
                        return Err(PersistenceError::InvalidFormat(format!(
                            "expected a JSON object in {}, found {}",
                            path.display(),
                            kind_name(&other)
                        )))
                    }
                }
            }
        } else {
            BTreeMap::new()
        };
        Ok(JsonFileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    /// A failed write leaves the previous value in place.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), PersistenceError> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// A failed write keeps the key.
    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError> {
        let Some(old) = self.entries.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = self.flush() {
            self.entries.insert(key.to_string(), old);
            return Err(e);
        }
        Ok(true)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
