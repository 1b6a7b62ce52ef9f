// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Lyft API.
//!
//! Provides [`LyftClient`] which handles app-token acquisition, fare
//! estimates, ride booking, and ride status, with transient error retry on
//! idempotent requests. Booking is never retried: a duplicate `POST
//! /v1/rides` could book two cars.

use std::time::Duration;

use hailer_core::{Coordinates, HailerError, RideEstimate, RideId, RideStatus};
use tracing::{debug, warn};

use crate::types::{CostEstimatesResponse, RideCreatedResponse, RideDetailResponse, RideRequest, TokenResponse};

/// Base URL for the Lyft API.
const API_BASE_URL: &str = "https://api.lyft.com";

/// HTTP client for Lyft API communication.
///
/// Manages OAuth client credentials, connection pooling, and retry logic
/// for transient errors (429, 500, 503) on idempotent requests.
#[derive(Debug, Clone)]
pub struct LyftClient {
    pub(crate) client: reqwest::Client,
    client_id: String,
    client_secret: String,
    max_retries: u32,
    pub(crate) base_url: String,
}

impl LyftClient {
    /// Creates a new Lyft API client.
    ///
    /// # Arguments
    /// * `client_id` - OAuth client id
    /// * `client_secret` - OAuth client secret
    /// * `timeout` - Per-request timeout
    pub fn new(
        client_id: String,
        client_secret: String,
        timeout: Duration,
    ) -> Result<Self, HailerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HailerError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            client_id,
            client_secret,
            max_retries: 1,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Fetches an app-scoped bearer token via the client_credentials grant.
    ///
    /// Fare estimates are public data and authenticate with this app token
    /// rather than a user token.
    pub(crate) async fn app_token(&self) -> Result<String, HailerError> {
        let response = self
            .client
            .post(format!("{}/oauth/token", self.base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", "public")])
            .send()
            .await
            .map_err(|e| HailerError::Upstream {
                service: "lyft".into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "app token response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HailerError::upstream(
                "lyft",
                format!("token endpoint returned {status}: {body}"),
            ));
        }

        let token: TokenResponse = response.json().await.map_err(|e| HailerError::Upstream {
            service: "lyft".into(),
            message: format!("failed to parse token response: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(token.access_token)
    }

    /// Fetches per-ride-type cost and ETA estimates for a trip.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn cost_estimates(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Vec<RideEstimate>, HailerError> {
        let token = self.app_token().await?;
        let url = format!("{}/v1/cost", self.base_url);
        let query = [
            ("start_lat", origin.lat.to_string()),
            ("start_lng", origin.lng.to_string()),
            ("end_lat", destination.lat.to_string()),
            ("end_lng", destination.lng.to_string()),
        ];

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying cost request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .query(&query)
                .send()
                .await
                .map_err(|e| HailerError::Upstream {
                    service: "lyft".into(),
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "cost response received");

            if status.is_success() {
                let body: CostEstimatesResponse =
                    response.json().await.map_err(|e| HailerError::Upstream {
                        service: "lyft".into(),
                        message: format!("failed to parse cost response: {e}"),
                        source: Some(Box::new(e)),
                    })?;

                // Provider order is part of the contract; the rendered
                // summary must list ride types the way the API did.
                return Ok(body
                    .cost_estimates
                    .into_iter()
                    .map(|e| RideEstimate {
                        ride_type: e.display_name,
                        min_cost_cents: e.estimated_cost_cents_min,
                        max_cost_cents: e.estimated_cost_cents_max,
                        eta_seconds: e.estimated_duration_seconds,
                    })
                    .collect());
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(HailerError::upstream(
                    "lyft",
                    format!("API returned {status}: {body}"),
                ));
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            return Err(HailerError::upstream(
                "lyft",
                format!("API returned {status}: {body}"),
            ));
        }

        Err(last_error.unwrap_or_else(|| HailerError::upstream("lyft", "request failed after retries")))
    }

    /// Places a ride request with the user's token. Single attempt only.
    pub async fn book_ride(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        ride_type: &str,
        access_token: &str,
    ) -> Result<RideId, HailerError> {
        let body = RideRequest {
            ride_type: ride_type.to_string(),
            origin,
            destination,
        };

        let response = self
            .client
            .post(format!("{}/v1/rides", self.base_url))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| HailerError::Upstream {
                service: "lyft".into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, ride_type, "ride request response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HailerError::upstream(
                "lyft",
                format!("ride request returned {status}: {body}"),
            ));
        }

        let created: RideCreatedResponse =
            response.json().await.map_err(|e| HailerError::Upstream {
                service: "lyft".into(),
                message: format!("failed to parse ride response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(RideId(created.ride_id))
    }

    /// Polls the status of a booked ride.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn ride_detail(
        &self,
        access_token: &str,
        ride_id: &RideId,
    ) -> Result<RideStatus, HailerError> {
        let url = format!("{}/v1/rides/{}", self.base_url, ride_id.0);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying status request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .get(&url)
                .bearer_auth(access_token)
                .send()
                .await
                .map_err(|e| HailerError::Upstream {
                    service: "lyft".into(),
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "ride status response received");

            if status.is_success() {
                let detail: RideDetailResponse =
                    response.json().await.map_err(|e| HailerError::Upstream {
                        service: "lyft".into(),
                        message: format!("failed to parse status response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                return Ok(detail.status);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(HailerError::upstream(
                    "lyft",
                    format!("API returned {status}: {body}"),
                ));
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(HailerError::upstream(
                "lyft",
                format!("API returned {status}: {body}"),
            ));
        }

        Err(last_error.unwrap_or_else(|| HailerError::upstream("lyft", "request failed after retries")))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
pub(crate) fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
