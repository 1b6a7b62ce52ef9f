// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lyft API adapter for Hailer.
//!
//! [`LyftClient`] implements three of the service adapters behind the
//! dialog engine:
//!
//! - [`LoginAdapter`]: the three-step SMS-PIN login exchange
//! - [`FareAdapter`]: per-ride-type cost and ETA estimates
//! - [`RideAdapter`]: ride booking and status polling
//!
//! Estimates authenticate with an app token obtained via the
//! client_credentials grant; booking and status use the per-user token the
//! login flow produces.

pub mod client;
pub mod login;
pub mod types;

pub use client::LyftClient;

use async_trait::async_trait;
use hailer_core::{
    AuthorizationCode, Coordinates, Credentials, FareAdapter, HailerError, HealthStatus,
    LoginAdapter, LoginSession, RideAdapter, RideEstimate, RideId, RideStatus, ServiceAdapter,
};
use tracing::debug;

#[async_trait]
impl ServiceAdapter for LyftClient {
    fn name(&self) -> &str {
        "lyft"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, HailerError> {
        // A constructable client is healthy. A full check would hit the
        // token endpoint and count against the provider's rate limits.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HailerError> {
        debug!("lyft client shutting down");
        Ok(())
    }
}

#[async_trait]
impl FareAdapter for LyftClient {
    async fn estimate_fares(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Vec<RideEstimate>, HailerError> {
        self.cost_estimates(origin, destination).await
    }
}

#[async_trait]
impl RideAdapter for LyftClient {
    async fn request_ride(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        ride_type: &str,
        access_token: &str,
    ) -> Result<RideId, HailerError> {
        self.book_ride(origin, destination, ride_type, access_token)
            .await
    }

    async fn ride_status(
        &self,
        access_token: &str,
        ride_id: &RideId,
    ) -> Result<RideStatus, HailerError> {
        self.ride_detail(access_token, ride_id).await
    }
}

#[async_trait]
impl LoginAdapter for LyftClient {
    async fn login_start(&self, user_id: &str) -> Result<LoginSession, HailerError> {
        // User ids are phone numbers as far as the provider is concerned.
        self.phone_register(user_id).await
    }

    async fn login_continue(
        &self,
        session: &LoginSession,
        pin: &str,
    ) -> Result<Option<AuthorizationCode>, HailerError> {
        self.phone_verify(session, pin).await
    }

    async fn exchange_token(&self, code: &AuthorizationCode) -> Result<Credentials, HailerError> {
        self.exchange_code(code).await
    }
}
