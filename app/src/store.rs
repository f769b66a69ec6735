//! FILENAME: app/src/store.rs
//! PURPOSE: The preference store selected by configuration.

use std::path::Path;

use persistence::{JsonFileStore, KeyValueStore, MemoryStore, PersistenceError};
use serde_json::Value;

#[derive(Debug)]
pub enum PreferenceStore {
    Memory(MemoryStore),
    File(JsonFileStore),
}

impl PreferenceStore {
    /// File-backed when a path is given, in-memory otherwise.
    pub fn open(path: Option<&Path>) -> Result<Self, PersistenceError> {
        match path {
            Some(path) => Ok(PreferenceStore::File(JsonFileStore::open(path)?)),
            None => Ok(PreferenceStore::Memory(MemoryStore::new())),
        }
    }
}

impl KeyValueStore for PreferenceStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        match self {
            PreferenceStore::Memory(s) => s.get_value(key),
            PreferenceStore::File(s) => s.get_value(key),
        }
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), PersistenceError> {
        match self {
            PreferenceStore::Memory(s) => s.set_value(key, value),
            PreferenceStore::File(s) => s.set_value(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<bool, PersistenceError> {
        match self {
            PreferenceStore::Memory(s) => s.remove(key),
            PreferenceStore::File(s) => s.remove(key),
        }
    }

    fn keys(&self) -> Vec<String> {
        match self {
            PreferenceStore::Memory(s) => s.keys(),
            PreferenceStore::File(s) => s.keys(),
        }
    }
}
