use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use study_core::model::{SESSION_KEY_PREFIX, SessionKey};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage quota exceeded")]
    QuotaExceeded,
}

/// String-keyed persistent storage with string values.
///
/// Any backend that can get and set by key satisfies the session store:
/// an in-memory map, a file, or an embedded database.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Keys starting with `prefix`, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// Simple in-memory store for tests and sessions that should not outlive the process.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Storage backend behind a trait object for easy swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            kv: Arc::new(InMemoryRepository::new()),
        }
    }

    #[must_use]
    pub fn from_store(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Session keys that currently hold a snapshot, oldest first for per-launch keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn session_keys(&self) -> Result<Vec<SessionKey>, StorageError> {
        let keys = self.kv.keys_with_prefix(SESSION_KEY_PREFIX).await?;
        Ok(keys.into_iter().map(SessionKey::from_raw).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_overwrites_and_remove_is_idempotent() {
        let repo = InMemoryRepository::new();
        repo.set("a", "1").await.unwrap();
        repo.set("a", "2").await.unwrap();
        assert_eq!(repo.get("a").await.unwrap().as_deref(), Some("2"));

        repo.remove("a").await.unwrap();
        repo.remove("a").await.unwrap();
        assert_eq!(repo.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn session_keys_filters_by_prefix() {
        let storage = Storage::in_memory();
        storage.kv.set("brainifi_session_2", "{}").await.unwrap();
        storage.kv.set("brainifi_session_1", "{}").await.unwrap();
        storage.kv.set("other", "{}").await.unwrap();

        let keys = storage.session_keys().await.unwrap();
        let names: Vec<&str> = keys.iter().map(SessionKey::name).collect();
        assert_eq!(names, vec!["1", "2"]);
    }
}
