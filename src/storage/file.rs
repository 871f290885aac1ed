// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! File-backed storage
//!
//! Durable scope: the whole map is kept in memory and written to a JSON
//! file on every change. Writes go to a sibling temp file first and are
//! renamed into place.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::StorageBackend;
use crate::error::{Error, Result};

/// JSON file key/value store
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open `path`, starting empty if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let items = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    Error::storage(format!("Corrupt storage file {}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), items = items.len(), "Opened file storage");

        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the map and swap it in once it is on disk.
    /// `change` returns whether anything changed.
    fn commit<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut items = self.items.write();
        let mut next = items.clone();
        if !change(&mut next) {
            return Ok(());
        }

        self.persist(&next)?;
        *items = next;
        Ok(())
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.commit(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.commit(|items| items.remove(key).is_some())
    }

    fn clear(&self) -> Result<()> {
        self.commit(|items| {
            items.clear();
            true
        })
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.read().keys().cloned().collect())
    }

    fn scope(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local.json");

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set_item("token", "abc").unwrap();
            storage.set_item("theme", "dark").unwrap();
            storage.remove_item("theme").unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get_item("theme").unwrap(), None);
        assert_eq!(reopened.keys().unwrap(), vec!["token"]);
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("k", "v").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local.json");
        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("kept", "1").unwrap();

        // A regular file where the parent directory should be makes every write fail
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let broken = FileStorage {
            path: blocker.join("store.json"),
            items: RwLock::new(storage.items.read().clone()),
        };

        assert!(broken.set_item("token", "abc").is_err());
        assert_eq!(broken.get_item("token").unwrap(), None);

        assert!(broken.remove_item("kept").is_err());
        assert_eq!(broken.get_item("kept").unwrap().as_deref(), Some("1"));

        assert!(broken.clear().is_err());
        assert_eq!(broken.keys().unwrap(), vec!["kept"]);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }
}
