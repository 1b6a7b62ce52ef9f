// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ride booking and status adapter trait.

use async_trait::async_trait;

use crate::error::HailerError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::{Coordinates, RideId, RideStatus};

/// Adapter for placing ride requests and polling their status.
#[async_trait]
pub trait RideAdapter: ServiceAdapter {
    /// Requests a ride on the user's behalf. Any failure here is terminal
    /// for the booking.
    async fn request_ride(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        ride_type: &str,
        access_token: &str,
    ) -> Result<RideId, HailerError>;

    /// Polls the current status of a booked ride.
    async fn ride_status(
        &self,
        access_token: &str,
        ride_id: &RideId,
    ) -> Result<RideStatus, HailerError>;
}
