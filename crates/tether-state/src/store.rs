// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed persistence for plugin active flags.
//!
//! [`SqliteStateStore`] manages the `plugin_flags` table, created on open.
//! The registry reads the full flag map once per reload and writes one row
//! per `set_active` call.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tether_core::{StateStore, TetherError};
use tokio_rusqlite::Connection;

/// SQLite-backed store for per-plugin active flags.
///
/// Holds an `Arc<Connection>` and delegates SQL operations via `call()`.
pub struct SqliteStateStore {
    conn: Arc<Connection>,
}

impl SqliteStateStore {
    /// Opens (or creates) the state database at the given path and ensures
    /// the `plugin_flags` table exists.
    pub async fn open(path: &Path) -> Result<Self, TetherError> {
        let conn = Connection::open(path)
            .await
            .map_err(tokio_rusqlite::Error::from)
            .map_err(state_err("open state database"))?;
        Self::init(conn).await
    }

    /// Opens an in-memory state database. Nothing survives the process.
    pub async fn open_in_memory() -> Result<Self, TetherError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(tokio_rusqlite::Error::from)
            .map_err(state_err("open in-memory state database"))?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, TetherError> {
        conn.call(|conn| {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS plugin_flags (
                    name TEXT PRIMARY KEY,
                    active INTEGER NOT NULL,
                    updated_at TEXT NOT NULL
                )",
            )?;
            Ok(())
        })
        .await
        .map_err(state_err("create plugin_flags table"))?;
        Ok(Self { conn: Arc::new(conn) })
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn load_active_flags(&self) -> Result<HashMap<String, bool>, TetherError> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare("SELECT name, active FROM plugin_flags")?;
                let flags = stmt
                    .query_map([], |row| {
                        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? != 0))
                    })?
                    .collect::<Result<HashMap<_, _>, _>>()?;
                Ok(flags)
            })
            .await
            .map_err(state_err("load active flags"))
    }

    async fn save_active_flag(&self, name: &str, active: bool) -> Result<(), TetherError> {
        let name = name.to_string();
        let now = Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO plugin_flags (name, active, updated_at) \
                     VALUES (?1, ?2, ?3)",
                    rusqlite::params![name, active as i64, now],
                )?;
                Ok(())
            })
            .await
            .map_err(state_err("save active flag"))
    }
}

/// Map a tokio-rusqlite error into the typed state variant.
fn state_err(
    context: &'static str,
) -> impl FnOnce(tokio_rusqlite::Error<rusqlite::Error>) -> TetherError {
    move |e| TetherError::State {
        message: format!("failed to {context}: {e}"),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_loads_empty_map() {
        let store = SqliteStateStore::open_in_memory().await.unwrap();
        assert!(store.load_active_flags().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let store = SqliteStateStore::open_in_memory().await.unwrap();

        store.save_active_flag("wake_on_lan", false).await.unwrap();
        store.save_active_flag("hello", true).await.unwrap();

        let flags = store.load_active_flags().await.unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags.get("wake_on_lan"), Some(&false));
        assert_eq!(flags.get("hello"), Some(&true));
    }

    #[tokio::test]
    async fn save_replaces_prior_value() {
        let store = SqliteStateStore::open_in_memory().await.unwrap();

        store.save_active_flag("hello", true).await.unwrap();
        store.save_active_flag("hello", false).await.unwrap();

        let flags = store.load_active_flags().await.unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags.get("hello"), Some(&false));
    }

    #[tokio::test]
    async fn flags_survive_reopen_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("state.db");

        {
            let store = SqliteStateStore::open(&path).await.unwrap();
            store.save_active_flag("filesystem", false).await.unwrap();
        }

        let store = SqliteStateStore::open(&path).await.unwrap();
        let flags = store.load_active_flags().await.unwrap();
        assert_eq!(flags.get("filesystem"), Some(&false));
    }
}
