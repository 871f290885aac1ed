// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Key/value storage with durable and session scopes
//!
//! - **Memory**: session scope, lives as long as the process
//! - **File**: durable scope, a JSON file rewritten on every change
//!
//! [`Storage`] stores values as JSON text, the way browser storage is
//! usually used.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Trait for raw string storage backends
pub trait StorageBackend: Send + Sync {
    /// Read a raw value
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a raw value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; missing keys are fine
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Delete everything
    fn clear(&self) -> Result<()>;

    /// Stored keys, sorted
    fn keys(&self) -> Result<Vec<String>>;

    /// Backend name for debugging
    fn scope(&self) -> &'static str;
}

/// JSON view over a storage backend
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
}

impl Storage {
    /// Wrap a backend
    pub fn new<B: StorageBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Session-scoped in-memory storage
    pub fn memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Durable storage in a JSON file
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(FileStorage::open(path)?))
    }

    /// Read and parse a JSON value; `None` when the key is unset
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_item(key, &raw)
    }

    /// Read a raw string without JSON parsing
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        self.backend.get_item(key)
    }

    /// Store a raw string without JSON encoding
    pub fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set_item(key, value)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove_item(key)
    }

    pub fn clear(&self) -> Result<()> {
        self.backend.clear()
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        self.backend.keys()
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.backend.get_item(key)?.is_some())
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("scope", &self.backend.scope())
            .finish()
    }
}

/// Durable plus session storage, like a browser's `localStorage` and
/// `sessionStorage`
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    local: Storage,
    session: Storage,
}

impl BrowserStorage {
    /// Both scopes in memory
    pub fn in_memory() -> Self {
        Self {
            local: Storage::memory(),
            session: Storage::memory(),
        }
    }

    /// Durable scope in a file, session scope in memory
    pub fn with_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            local: Storage::file(path)?,
            session: Storage::memory(),
        })
    }

    /// Durable scope
    pub fn local(&self) -> &Storage {
        &self.local
    }

    /// Session scope
    pub fn session(&self) -> &Storage {
        &self.session
    }
}

impl Default for BrowserStorage {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        size: u32,
    }

    #[test]
    fn test_json_round_trip() {
        let storage = Storage::memory();
        let prefs = Prefs {
            theme: "dark".into(),
            size: 14,
        };

        storage.set("prefs", &prefs).unwrap();

        assert_eq!(storage.get::<Prefs>("prefs").unwrap(), Some(prefs));
        assert_eq!(
            storage.get_string("prefs").unwrap().as_deref(),
            Some("{\"theme\":\"dark\",\"size\":14}")
        );
        assert_eq!(storage.get::<Prefs>("missing").unwrap(), None);
    }

    #[test]
    fn test_raw_string_is_not_json() {
        let storage = Storage::memory();
        storage.set_string("token", "abc").unwrap();

        assert_eq!(storage.get_string("token").unwrap().as_deref(), Some("abc"));
        let err = storage.get::<String>("token").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_scopes_are_separate() {
        let storage = BrowserStorage::in_memory();
        storage.local().set("k", &1).unwrap();

        assert!(storage.local().contains("k").unwrap());
        assert!(!storage.session().contains("k").unwrap());

        storage.local().remove("k").unwrap();
        assert!(storage.local().keys().unwrap().is_empty());
    }

    #[test]
    fn test_file_scope_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local.json");

        BrowserStorage::with_file(&path)
            .unwrap()
            .local()
            .set("user", &serde_json::json!({"id": 1}))
            .unwrap();

        let reopened = BrowserStorage::with_file(&path).unwrap();
        assert_eq!(
            reopened.local().get::<serde_json::Value>("user").unwrap(),
            Some(serde_json::json!({"id": 1}))
        );
        assert!(reopened.session().keys().unwrap().is_empty());
    }
}
