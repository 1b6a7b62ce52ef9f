// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`SessionStore`] trait.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;
use tokio::sync::OnceCell;
use tracing::debug;

use hailer_core::{Credentials, HailerError, HealthStatus, ServiceAdapter, SessionStore};

use crate::database::{Database, map_tr_err};

/// SQLite-backed credential store.
///
/// Wraps a [`Database`] handle. The database is opened lazily on the first
/// call to [`SqliteSessionStore::initialize`], not at construction, so a
/// bad path fails at startup with a clear error instead of on the first
/// user turn.
pub struct SqliteSessionStore {
    database_path: String,
    db: OnceCell<Database>,
}

impl SqliteSessionStore {
    /// Creates a store for the given database path. The connection is not
    /// opened until [`initialize`](Self::initialize) is called.
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            db: OnceCell::new(),
        }
    }

    /// Opens the database and runs migrations.
    pub async fn initialize(&self) -> Result<(), HailerError> {
        let db = Database::open(&self.database_path).await?;
        self.db.set(db).map_err(|_| HailerError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.database_path, "SQLite session store initialized");
        Ok(())
    }

    fn db(&self) -> Result<&Database, HailerError> {
        self.db.get().ok_or_else(|| HailerError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl ServiceAdapter for SqliteSessionStore {
    fn name(&self) -> &str {
        "sqlite-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, HailerError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HailerError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get(&self, user_id: &str) -> Result<Option<Credentials>, HailerError> {
        let user_id = user_id.to_string();
        self.db()?
            .connection()
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT access_token, refresh_token FROM credentials WHERE user_id = ?1",
                )?;
                let result = stmt.query_row(params![user_id], |row| {
                    Ok(Credentials {
                        access_token: row.get(0)?,
                        refresh_token: row.get(1)?,
                    })
                });
                match result {
                    Ok(creds) => Ok(Some(creds)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
            .map_err(map_tr_err)
    }

    async fn put(&self, user_id: &str, credentials: &Credentials) -> Result<(), HailerError> {
        let user_id = user_id.to_string();
        let credentials = credentials.clone();
        let now = Utc::now().to_rfc3339();
        self.db()?
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO credentials (user_id, access_token, refresh_token, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?4)
                     ON CONFLICT(user_id) DO UPDATE SET
                         access_token = excluded.access_token,
                         refresh_token = excluded.refresh_token,
                         updated_at = excluded.updated_at",
                    params![
                        user_id,
                        credentials.access_token,
                        credentials.refresh_token,
                        now,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}
