// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Lyft API.

use hailer_core::{Coordinates, RideStatus};
use serde::{Deserialize, Serialize};

/// Response from `POST /oauth/token` (both grant types).
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Present for the authorization_code grant, absent for client_credentials.
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Response from `GET /v1/cost`.
#[derive(Debug, Deserialize)]
pub struct CostEstimatesResponse {
    #[serde(default)]
    pub cost_estimates: Vec<CostEstimate>,
}

/// One per-ride-type estimate, in the provider's listing order.
#[derive(Debug, Deserialize)]
pub struct CostEstimate {
    pub display_name: String,
    pub estimated_cost_cents_min: i64,
    pub estimated_cost_cents_max: i64,
    #[serde(default)]
    pub estimated_duration_seconds: i64,
}

/// Request body for `POST /v1/phone/register`.
#[derive(Debug, Serialize)]
pub struct PhoneRegisterRequest {
    pub phone: String,
}

/// Response from `POST /v1/phone/register`: an opaque handle for the rest
/// of the login exchange.
#[derive(Debug, Deserialize)]
pub struct PhoneRegisterResponse {
    pub login_session: String,
}

/// Request body for `POST /v1/phone/verify`.
#[derive(Debug, Serialize)]
pub struct PhoneVerifyRequest {
    pub login_session: String,
    pub code: String,
}

/// Response from `POST /v1/phone/verify` on success.
#[derive(Debug, Deserialize)]
pub struct PhoneVerifyResponse {
    pub authorization_code: String,
}

/// Request body for `POST /v1/rides`.
#[derive(Debug, Serialize)]
pub struct RideRequest {
    pub ride_type: String,
    pub origin: Coordinates,
    pub destination: Coordinates,
}

/// Response from `POST /v1/rides`.
#[derive(Debug, Deserialize)]
pub struct RideCreatedResponse {
    pub ride_id: String,
    #[serde(default)]
    pub status: Option<RideStatus>,
}

/// Response from `GET /v1/rides/{id}`.
#[derive(Debug, Deserialize)]
pub struct RideDetailResponse {
    pub status: RideStatus,
}
