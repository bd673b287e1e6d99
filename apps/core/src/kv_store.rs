use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::config::Config;
use crate::preferences::{PreferenceBackend, StorageError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS preference (key TEXT PRIMARY KEY, value TEXT NOT NULL)";

pub fn open_memory() -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open_in_memory()?;
    conn.execute(SCHEMA, [])?;
    Ok(conn)
}

pub fn open_file(path: &Path) -> Result<Connection, StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            StorageError::Unavailable(format!("failed to create preferences dir: {e}"))
        })?;
    }
    let conn = Connection::open(path)?;
    conn.execute(SCHEMA, [])?;
    Ok(conn)
}

pub fn open_from_config(cfg: &Config) -> Result<Connection, StorageError> {
    open_file(&cfg.preferences_path)
}

pub fn get_value(db: &Connection, key: &str) -> Result<Option<String>, rusqlite::Error> {
    db.query_row(
        "SELECT value FROM preference WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

pub fn set_value(db: &Connection, key: &str, value: &str) -> Result<(), rusqlite::Error> {
    db.execute(
        "INSERT INTO preference (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Persistent preference backend: one row per key in a local SQLite file.
pub struct SqliteBackend {
    db: Connection,
}

impl SqliteBackend {
    pub fn new(db: Connection) -> Self {
        Self { db }
    }

    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self::new(open_file(path)?))
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(open_memory()?))
    }
}

impl PreferenceBackend for SqliteBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(get_value(&self.db, key)?)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(set_value(&self.db, key, value)?)
    }
}
