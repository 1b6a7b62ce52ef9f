// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store trait for credential persistence.

use async_trait::async_trait;

use crate::error::HailerError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::Credentials;

/// Keyed credential storage: user id in, last-known token pair out.
///
/// This is the engine's only cross-session state; dialog progress itself
/// rides in the turn's session attributes. Entries are read and written
/// whole, one user at a time.
#[async_trait]
pub trait SessionStore: ServiceAdapter {
    /// Fetches the stored credentials for a user, if any.
    async fn get(&self, user_id: &str) -> Result<Option<Credentials>, HailerError>;

    /// Stores or replaces the credentials for a user.
    async fn put(&self, user_id: &str, credentials: &Credentials) -> Result<(), HailerError>;
}
