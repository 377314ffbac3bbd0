//! Local key-value storage.
//!
//! Mirrors the browser's `localStorage` contract: string keys, string values,
//! synchronous reads and writes. The production backend is a small `SQLite`
//! database; an in-memory backend is used in tests.

#[cfg(test)]
use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{AppError, Result};

/// Synchronous string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key` if present.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Local storage backed by `SQLite`.
pub struct LocalStorage {
    conn: Connection,
}

impl LocalStorage {
    /// Opens or creates the local storage database.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create storage directory", e))?;
        }

        let conn = Connection::open(path).map_err(AppError::storage)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = FULL;",
        )
        .map_err(AppError::storage)?;

        let storage = Self { conn };
        storage.init_schema()?;

        tracing::debug!(path = %path.display(), "Opened local storage");
        Ok(storage)
    }

    /// Opens a throwaway in-process database.
    ///
    /// # Errors
    /// Returns error if the database cannot be created.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(AppError::storage)?;
        let storage = Self { conn };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Initialize database schema.
    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
            )
            .map_err(AppError::storage)?;

        Ok(())
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(AppError::storage)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                r"
            INSERT INTO local_storage (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            ",
                params![key, value],
            )
            .map_err(AppError::storage)?;

        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", [key])
            .map_err(AppError::storage)?;

        Ok(())
    }
}

/// Volatile storage for tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
