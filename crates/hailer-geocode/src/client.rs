// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Google Geocoding API.
//!
//! Provides [`GeocodeClient`] which resolves free-text addresses into
//! coordinates, with transient error retry.

use std::time::Duration;

use hailer_core::{Coordinates, HailerError};
use tracing::{debug, warn};

use crate::types::GeocodeResponse;

/// Base URL for the Google Geocoding API.
const API_BASE_URL: &str = "https://maps.googleapis.com";

/// Request path under the base URL.
const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// HTTP client for geocoding requests.
///
/// Manages connection pooling, the optional API key, and retry logic for
/// transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: reqwest::Client,
    api_key: Option<String>,
    max_retries: u32,
    base_url: String,
}

impl GeocodeClient {
    /// Creates a new geocoding client.
    ///
    /// # Arguments
    /// * `api_key` - Provider API key; `None` sends unauthenticated requests
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, HailerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HailerError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
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

    /// Resolves an address to the first candidate's coordinates.
    ///
    /// An empty result set is a validation failure (the address does not
    /// exist as far as the provider is concerned); transport errors and
    /// non-2xx statuses are upstream failures. On transient errors (429,
    /// 500, 503), retries once after a 1-second delay.
    pub async fn lookup(&self, address: &str) -> Result<Coordinates, HailerError> {
        let url = format!("{}{GEOCODE_PATH}", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying geocode request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let mut query: Vec<(&str, &str)> = vec![("sensor", "false"), ("address", address)];
            if let Some(key) = self.api_key.as_deref() {
                query.push(("key", key));
            }

            let response = self
                .client
                .get(&url)
                .query(&query)
                .send()
                .await
                .map_err(|e| HailerError::Upstream {
                    service: "geocode".into(),
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "geocode response received");

            if status.is_success() {
                let body: GeocodeResponse =
                    response.json().await.map_err(|e| HailerError::Upstream {
                        service: "geocode".into(),
                        message: format!("failed to parse geocode response: {e}"),
                        source: Some(Box::new(e)),
                    })?;

                return match body.results.first() {
                    Some(result) => Ok(Coordinates {
                        lat: result.geometry.location.lat,
                        lng: result.geometry.location.lng,
                    }),
                    None => {
                        debug!(provider_status = %body.status, "geocode returned no results");
                        Err(HailerError::validation(format!(
                            "no geocoding result for `{address}`"
                        )))
                    }
                };
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(HailerError::upstream(
                    "geocode",
                    format!("API returned {status}: {body}"),
                ));
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            return Err(HailerError::upstream(
                "geocode",
                format!("API returned {status}: {body}"),
            ));
        }

        Err(last_error
            .unwrap_or_else(|| HailerError::upstream("geocode", "request failed after retries")))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: &str) -> GeocodeClient {
        GeocodeClient::new(Some("test-key".into()), Duration::from_secs(5))
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn match_body() -> serde_json::Value {
        serde_json::json!({
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 37.4224764, "lng": -122.0842499}}},
                {"geometry": {"location": {"lat": 1.0, "lng": 1.0}}}
            ]
        })
    }

    #[tokio::test]
    async fn lookup_returns_first_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .and(query_param("address", "1600 Amphitheatre Parkway"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(match_body()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let coords = client.lookup("1600 Amphitheatre Parkway").await.unwrap();

        assert!((coords.lat - 37.4224764).abs() < 1e-9);
        assert!((coords.lng - -122.0842499).abs() < 1e-9);
    }

    #[tokio::test]
    async fn lookup_without_key_omits_query_param() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(match_body()))
            .mount(&server)
            .await;

        let client = GeocodeClient::new(None, Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.uri());
        assert!(client.lookup("somewhere").await.is_ok());
    }

    #[tokio::test]
    async fn empty_results_is_a_validation_failure() {
        let server = MockServer::start().await;

        let body = serde_json::json!({"status": "ZERO_RESULTS", "results": []});
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.lookup("asdfqwerty").await.unwrap_err();
        assert!(matches!(err, HailerError::Validation { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn lookup_retries_on_429() {
        let server = MockServer::start().await;

        // First request returns 429, second returns 200.
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(match_body()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.lookup("retry street").await.is_ok());
    }

    #[tokio::test]
    async fn lookup_exhausts_retries_on_503() {
        let server = MockServer::start().await;

        // Both attempts return 503.
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.lookup("unlucky avenue").await.unwrap_err();
        assert!(matches!(err, HailerError::Upstream { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn lookup_fails_fast_on_403() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.lookup("forbidden road").await.unwrap_err();
        assert!(matches!(err, HailerError::Upstream { .. }), "got: {err}");
    }
}
