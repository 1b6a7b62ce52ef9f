// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use hailer_core::HailerError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Handle to the SQLite database.
///
/// Wraps a single [`tokio_rusqlite::Connection`]; all query code accepts
/// `&Database` and goes through [`Database::connection`], which serializes
/// every call on one background thread and eliminates SQLITE_BUSY errors
/// under concurrent access.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if necessary) the database at `path`, applies
    /// PRAGMAs, and runs any pending migrations.
    pub async fn open(path: &str) -> Result<Self, HailerError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| HailerError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| HailerError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| match e {
                tokio_rusqlite::Error::Error(inner) => inner,
                other => HailerError::Storage {
                    source: Box::new(other),
                },
            })?;

        debug!(path, "database opened, migrations applied");
        Ok(Self { conn })
    }

    /// Returns the underlying connection for query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoints the WAL and releases the connection.
    pub async fn close(&self) -> Result<(), HailerError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Maps a tokio-rusqlite error into the storage variant.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HailerError {
    HailerError::Storage {
        source: Box::new(e),
    }
}
