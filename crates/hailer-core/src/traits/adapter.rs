// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all service adapters must implement.

use async_trait::async_trait;

use crate::error::HailerError;
use crate::types::HealthStatus;

/// The base trait for all Hailer service adapters.
///
/// Every adapter (geocoding, fares, rides, login, session store) must
/// implement this trait, which provides identity, lifecycle, and health
/// check capabilities.
#[async_trait]
pub trait ServiceAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, HailerError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), HailerError>;
}
