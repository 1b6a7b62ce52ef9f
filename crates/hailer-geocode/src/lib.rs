// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Geocoding adapter for Hailer, backed by the Google Geocoding API.
//!
//! [`GeocodeClient`] implements [`GeocodeAdapter`]: free-text address in,
//! coordinates of the best candidate out. An address the provider cannot
//! resolve is a validation failure, which the dialog engine turns into a
//! re-prompt rather than a crashed turn.

pub mod client;
pub mod types;

pub use client::GeocodeClient;

use async_trait::async_trait;
use hailer_core::{Coordinates, GeocodeAdapter, HailerError, HealthStatus, ServiceAdapter};
use tracing::debug;

#[async_trait]
impl ServiceAdapter for GeocodeClient {
    fn name(&self) -> &str {
        "google-geocode"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, HailerError> {
        // A constructable client is healthy. A full check would spend
        // provider quota on every probe.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HailerError> {
        debug!("geocode client shutting down");
        Ok(())
    }
}

#[async_trait]
impl GeocodeAdapter for GeocodeClient {
    async fn geocode(&self, address: &str) -> Result<Coordinates, HailerError> {
        self.lookup(address).await
    }
}
