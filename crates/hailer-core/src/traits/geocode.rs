// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Geocoding adapter trait.

use async_trait::async_trait;

use crate::error::HailerError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::Coordinates;

/// Adapter for resolving free-text addresses into coordinates.
#[async_trait]
pub trait GeocodeAdapter: ServiceAdapter {
    /// Resolves an address to a coordinate pair.
    ///
    /// Returns [`HailerError::Validation`] when the provider has no match
    /// for the address and [`HailerError::Upstream`] for transport or
    /// provider failures.
    async fn geocode(&self, address: &str) -> Result<Coordinates, HailerError>;
}
