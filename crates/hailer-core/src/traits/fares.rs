// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fare estimation adapter trait.

use async_trait::async_trait;

use crate::error::HailerError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::{Coordinates, RideEstimate};

/// Adapter for per-ride-type fare and ETA estimation.
#[async_trait]
pub trait FareAdapter: ServiceAdapter {
    /// Returns the provider's estimates for a trip, one per ride type, in
    /// the order the provider lists them.
    async fn estimate_fares(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Vec<RideEstimate>, HailerError>;
}
