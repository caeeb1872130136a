//! Storage collaborator
//!
//! The engine keeps one value bag under a fixed key plus a little UI state
//! (the selected person). Hosts plug in whatever persistence they have.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::errors::{AutofillError, Result};

/// Key/value storage for JSON documents.
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory storage implementation
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<DashMap<String, Value>>,
}

impl MemoryStorage {
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

#[async_trait]
impl StoragePort for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-based storage implementation, one JSON file per key.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AutofillError::Storage(format!("invalid storage key '{key}'")));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

fn io_error(err: std::io::Error) -> AutofillError {
    AutofillError::Storage(err.to_string())
}

#[async_trait]
impl StoragePort for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|err| AutofillError::Storage(format!("{}: {err}", path.display()))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(err)),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(io_error)?;
        let json = serde_json::to_vec_pretty(&value)
            .map_err(|err| AutofillError::Storage(err.to_string()))?;
        tokio::fs::write(path, json).await.map_err(io_error)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn memory_storage_round_trips() {
        let storage = MemoryStorage::new();
        assert_eq!(tokio_test::block_on(storage.get("visaData")).unwrap(), None);
        tokio_test::block_on(storage.set("visaData", json!({"a": 1}))).unwrap();
        assert_eq!(
            tokio_test::block_on(storage.get("visaData")).unwrap(),
            Some(json!({"a": 1}))
        );
        tokio_test::block_on(storage.remove("visaData")).unwrap();
        tokio_test::block_on(storage.remove("visaData")).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        tokio_test::block_on(other.set("selectedPersonId", json!("dep_0"))).unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(
            tokio_test::block_on(storage.get("selectedPersonId")).unwrap(),
            Some(json!("dep_0"))
        );
    }

    #[tokio::test]
    async fn file_storage_persists_between_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state");
        FileStorage::new(path.clone())
            .set("visaData", json!({"atlas_first_name": "Jane"}))
            .await
            .unwrap();
        let reopened = FileStorage::new(path);
        assert_eq!(
            reopened.get("visaData").await.unwrap(),
            Some(json!({"atlas_first_name": "Jane"}))
        );
        reopened.remove("visaData").await.unwrap();
        assert_eq!(reopened.get("visaData").await.unwrap(), None);
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());
        let err = tokio_test::block_on(storage.set("../escape", json!(1))).unwrap_err();
        assert!(matches!(err, AutofillError::Storage(_)));
    }
}
