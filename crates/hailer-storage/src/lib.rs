// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential persistence backends for Hailer.
//!
//! Two [`hailer_core::SessionStore`] implementations:
//!
//! - [`SqliteSessionStore`]: WAL-mode SQLite with embedded refinery
//!   migrations and a single-writer concurrency model via `tokio-rusqlite`.
//!   The default backend.
//! - [`MemorySessionStore`]: a dashmap, for tests and ephemeral deployments.
//!
//! Entries are whole credential records keyed by user id; a read or write
//! is one atomic operation against the backend, which is all the dialog
//! engine needs (it never read-modify-writes a record across calls).

pub mod database;
pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use database::Database;
pub use memory::MemorySessionStore;
pub use sqlite::SqliteSessionStore;
