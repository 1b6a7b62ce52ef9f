// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Google Geocoding API.
//!
//! Only the fields the dialog needs are modeled; everything else in the
//! provider response is ignored.

use serde::Deserialize;

/// Top-level geocoding response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Candidate matches, best first. Empty when the address is unknown.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Provider status string ("OK", "ZERO_RESULTS", ...).
    #[serde(default)]
    pub status: String,
}

/// One candidate match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}
