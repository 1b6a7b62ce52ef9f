// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory implementation of the [`SessionStore`] trait.

use async_trait::async_trait;
use dashmap::DashMap;

use hailer_core::{Credentials, HailerError, HealthStatus, ServiceAdapter, SessionStore};

/// Credential store backed by a concurrent map.
///
/// Nothing survives a restart; intended for tests and ephemeral
/// deployments where re-login on every process start is acceptable.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, Credentials>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credential records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ServiceAdapter for MemorySessionStore {
    fn name(&self) -> &str {
        "memory-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, HailerError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HailerError> {
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user_id: &str) -> Result<Option<Credentials>, HailerError> {
        Ok(self.entries.get(user_id).map(|e| e.value().clone()))
    }

    async fn put(&self, user_id: &str, credentials: &Credentials) -> Result<(), HailerError> {
        self.entries
            .insert(user_id.to_string(), credentials.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_and_replace() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get("u1").await.unwrap(), None);

        let first = Credentials {
            access_token: "a1".into(),
            refresh_token: "r1".into(),
        };
        store.put("u1", &first).await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some(first));

        let second = Credentials {
            access_token: "a2".into(),
            refresh_token: "r2".into(),
        };
        store.put("u1", &second).await.unwrap();
        assert_eq!(store.get("u1").await.unwrap().unwrap().access_token, "a2");
        assert_eq!(store.len(), 1);
    }
}
