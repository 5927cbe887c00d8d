//! File-backed key-value store for session aggregates.
//!
//! A flat JSON object on disk, rewritten on every set. Last-write-wins
//! across concurrent processes, which matches the documented persistence
//! guarantees of the tracking module.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use greenpath_core::Error;
use greenpath_core::tracking::KeyValueStore;

pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store, creating an empty one if the file does not exist.
    pub fn open(path: PathBuf) -> Result<Self, Error> {
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, values })
    }

    fn flush(&self) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}
