// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed access to the session attribute bag.
//!
//! The transport carries session state as a flat string map. Everything
//! the dialog persists between turns goes through [`TurnContext`], which
//! is the only code that knows the key names and value encodings. A
//! missing key always reads as "not yet set"; the transition function
//! takes the initializing branch rather than erroring on first use.

use std::str::FromStr;

use hailer_core::{Coordinates, Credentials, HailerError, RideEstimate, RideId, SessionAttributes};

use crate::state::DialogState;

/// Session attribute keys. All values are plain strings; `ESTIMATES` holds
/// a JSON-encoded array.
mod keys {
    pub const STATE: &str = "state";
    pub const LOGIN_SESSION: &str = "login_session";
    pub const PIN_ATTEMPTS: &str = "pin_attempts";
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const PICKUP_LAT: &str = "pickup_lat";
    pub const PICKUP_LNG: &str = "pickup_lng";
    pub const DROPOFF_LAT: &str = "dropoff_lat";
    pub const DROPOFF_LNG: &str = "dropoff_lng";
    pub const ESTIMATES: &str = "estimates";
    pub const RIDE_TYPE: &str = "ride_type";
    pub const RIDE_ID: &str = "ride_id";
}

/// Mutable working copy of one session's attributes for one turn.
///
/// Built from the inbound turn's attribute map and handed back, updated,
/// with the dialog action. Also carries a small amount of within-turn
/// scratch state (the PIN that just failed) that never enters the bag.
#[derive(Debug, Clone, Default)]
pub struct TurnContext {
    attrs: SessionAttributes,
    failed_pin: Option<String>,
}

impl TurnContext {
    pub fn new(attrs: SessionAttributes) -> Self {
        Self {
            attrs,
            failed_pin: None,
        }
    }

    /// Consumes the context, yielding the attribute map to persist.
    pub fn into_attributes(self) -> SessionAttributes {
        self.attrs
    }

    /// The stored dialog state. `Ok(None)` means first turn; a present but
    /// unparseable value is a malformed turn and fatal.
    pub fn state(&self) -> Result<Option<DialogState>, HailerError> {
        match self.attrs.get(keys::STATE) {
            None => Ok(None),
            Some(raw) => DialogState::from_str(raw).map(Some).map_err(|_| {
                HailerError::protocol(format!("unrecognized dialog state `{raw}`"))
            }),
        }
    }

    pub fn set_state(&mut self, state: DialogState) {
        self.attrs.insert(keys::STATE.into(), state.to_string());
    }

    pub fn credentials(&self) -> Option<Credentials> {
        let access_token = self.attrs.get(keys::ACCESS_TOKEN)?.clone();
        let refresh_token = self.attrs.get(keys::REFRESH_TOKEN)?.clone();
        Some(Credentials {
            access_token,
            refresh_token,
        })
    }

    pub fn set_credentials(&mut self, credentials: &Credentials) {
        self.attrs
            .insert(keys::ACCESS_TOKEN.into(), credentials.access_token.clone());
        self.attrs.insert(
            keys::REFRESH_TOKEN.into(),
            credentials.refresh_token.clone(),
        );
    }

    pub fn login_session(&self) -> Option<String> {
        self.attrs.get(keys::LOGIN_SESSION).cloned()
    }

    pub fn set_login_session(&mut self, session: &str) {
        self.attrs.insert(keys::LOGIN_SESSION.into(), session.into());
    }

    /// Failed PIN entries so far. An unparseable count reads as zero
    /// rather than wedging the session.
    pub fn pin_attempts(&self) -> u32 {
        self.attrs
            .get(keys::PIN_ATTEMPTS)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Records one more failed PIN entry and returns the new count.
    pub fn record_pin_failure(&mut self) -> u32 {
        let attempts = self.pin_attempts() + 1;
        self.attrs
            .insert(keys::PIN_ATTEMPTS.into(), attempts.to_string());
        attempts
    }

    pub fn reset_pin_attempts(&mut self) {
        self.attrs.remove(keys::PIN_ATTEMPTS);
    }

    /// The PIN value that was just rejected, if this turn saw a rejection.
    /// Scratch state for prompt wording; never persisted.
    pub fn failed_pin(&self) -> Option<&str> {
        self.failed_pin.as_deref()
    }

    pub fn note_failed_pin(&mut self, pin: &str) {
        self.failed_pin = Some(pin.to_string());
    }

    pub fn pickup_coordinates(&self) -> Option<Coordinates> {
        self.coordinates(keys::PICKUP_LAT, keys::PICKUP_LNG)
    }

    pub fn set_pickup_coordinates(&mut self, coords: Coordinates) {
        self.set_coordinates(keys::PICKUP_LAT, keys::PICKUP_LNG, coords);
    }

    pub fn dropoff_coordinates(&self) -> Option<Coordinates> {
        self.coordinates(keys::DROPOFF_LAT, keys::DROPOFF_LNG)
    }

    pub fn set_dropoff_coordinates(&mut self, coords: Coordinates) {
        self.set_coordinates(keys::DROPOFF_LAT, keys::DROPOFF_LNG, coords);
    }

    fn coordinates(&self, lat_key: &str, lng_key: &str) -> Option<Coordinates> {
        let lat = self.attrs.get(lat_key)?.parse().ok()?;
        let lng = self.attrs.get(lng_key)?.parse().ok()?;
        Some(Coordinates { lat, lng })
    }

    fn set_coordinates(&mut self, lat_key: &str, lng_key: &str, coords: Coordinates) {
        self.attrs.insert(lat_key.into(), coords.lat.to_string());
        self.attrs.insert(lng_key.into(), coords.lng.to_string());
    }

    /// The fare estimates cached when the ride-type question was asked,
    /// in provider order. `None` when absent or unreadable.
    pub fn estimates(&self) -> Option<Vec<RideEstimate>> {
        let raw = self.attrs.get(keys::ESTIMATES)?;
        serde_json::from_str(raw).ok()
    }

    pub fn set_estimates(&mut self, estimates: &[RideEstimate]) {
        // Estimates round-trip through the bag as a JSON string; an
        // encode failure here would be a bug in RideEstimate itself.
        if let Ok(json) = serde_json::to_string(estimates) {
            self.attrs.insert(keys::ESTIMATES.into(), json);
        }
    }

    pub fn ride_type(&self) -> Option<String> {
        self.attrs.get(keys::RIDE_TYPE).cloned()
    }

    pub fn set_ride_type(&mut self, ride_type: &str) {
        self.attrs.insert(keys::RIDE_TYPE.into(), ride_type.into());
    }

    pub fn ride_id(&self) -> Option<RideId> {
        self.attrs.get(keys::RIDE_ID).map(|v| RideId(v.clone()))
    }

    pub fn set_ride_id(&mut self, ride_id: &RideId) {
        self.attrs.insert(keys::RIDE_ID.into(), ride_id.0.clone());
    }

    /// Clears everything tied to the booking in progress, keeping `state`
    /// and the credential copy so a restarted flow skips login.
    pub fn clear_transient(&mut self) {
        for key in [
            keys::LOGIN_SESSION,
            keys::PIN_ATTEMPTS,
            keys::PICKUP_LAT,
            keys::PICKUP_LNG,
            keys::DROPOFF_LAT,
            keys::DROPOFF_LNG,
            keys::ESTIMATES,
            keys::RIDE_TYPE,
            keys::RIDE_ID,
        ] {
            self.attrs.remove(key);
        }
    }
}
