use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{KeyValueStore, StorageError};

use super::SqliteKvStore;

// SQLITE_FULL
const DISK_FULL_CODE: &str = "13";

fn map_write_error(err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(DISK_FULL_CODE) {
            return StorageError::QuotaExceeded;
        }
    }
    StorageError::Connection(err.to_string())
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(self.pool())
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        row.try_get::<String, _>("value")
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
            .bind(key)
            .execute(self.pool())
            .await
            .map_err(map_write_error)?;
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT key FROM kv_entries
            WHERE substr(key, 1, length(?1)) = ?1
            ORDER BY key ASC
            ",
        )
        .bind(prefix)
        .fetch_all(self.pool())
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("key")
                    .map_err(|err| StorageError::Serialization(err.to_string()))
            })
            .collect()
    }
}
