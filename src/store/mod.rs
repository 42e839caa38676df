pub mod migrations;
pub mod schema;

use crate::error::AppResult;
use chrono::Utc;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed document store: a flat set of named keys, each holding one
/// JSON document. Collections are rewritten whole on every mutation.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Read and deserialize the document stored under `key`.
    ///
    /// A missing key returns `Ok(None)`. A document that fails to parse is
    /// treated the same as a missing one: a warning is logged and `Ok(None)`
    /// is returned, leaving the raw value in place.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM documents WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => match serde_json::from_str(&text) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!("Malformed document under '{key}', treating as absent: {e}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`, replacing any previous
    /// document.
    pub fn write_json<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let text = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO documents (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
            params![key, text, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    pub fn delete(&self, key: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM documents WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Lock a shared store, recovering from poisoning if necessary
pub fn lock_store<'a>(store: &'a Mutex<Store>, context: &str) -> MutexGuard<'a, Store> {
    match store.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("{context}: store mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
