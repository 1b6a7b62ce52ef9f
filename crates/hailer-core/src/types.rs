// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Hailer dialog engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The only intent name the dialog engine routes. Anything else is a
/// protocol violation.
pub const BOOK_RIDE_INTENT: &str = "BookLyft";

/// Slot names on the ride-booking intent, as defined in the NLU model.
pub mod slots {
    /// Four-digit login PIN, delivered to the user out of band.
    pub const LYFT_PIN: &str = "LyftPIN";
    /// Free-text pickup address.
    pub const PICKUP_ADDRESS: &str = "PickupAddress";
    /// Yes/no readback of the pickup address.
    pub const PICKUP_ADDRESS_CONFIRM: &str = "PickupAddressConfirm";
    /// Free-text dropoff address.
    pub const DROPOFF_ADDRESS: &str = "DropoffAddress";
    /// Yes/no readback of the dropoff address.
    pub const DROPOFF_ADDRESS_CONFIRM: &str = "DropoffAddressConfirm";
    /// Ride type chosen from the fare summary.
    pub const RIDE_TYPE: &str = "RideType";
    /// Post-booking catch-all slot ("status" polls the ride).
    pub const CONFIRMATION: &str = "Confirmation";
}

/// Opaque per-user session state carried between turns.
///
/// The only state the engine persists across turns; every value is a plain
/// string (structured data is stored JSON-encoded) so the map round-trips
/// through the transport envelope unchanged.
pub type SessionAttributes = HashMap<String, String>;

/// One user turn, as handed to the dialog engine by the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub intent_name: String,
    pub user_id: String,
    /// Slot values resolved by the upstream NLU layer. `None` means the
    /// slot exists on the intent but was not filled this turn.
    pub slots: HashMap<String, Option<String>>,
    pub session_attributes: SessionAttributes,
    pub confirmation_status: ConfirmationStatus,
}

impl Turn {
    /// Returns the trimmed value of a slot. Null and blank values both
    /// count as unfilled.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|v| v.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Whether the NLU layer has already put the intent's confirmation question
/// to the user, and how they answered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
pub enum ConfirmationStatus {
    #[default]
    None,
    Confirmed,
    Denied,
}

/// The single outward-facing result of one dialog turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DialogAction {
    /// Ask the user to fill one named slot.
    ElicitSlot { slot_name: String, prompt: String },
    /// Ask the user to confirm the intent as currently filled.
    ConfirmIntent { prompt: String },
    /// Hand slot collection back to the NLU layer.
    Delegate,
    /// End the dialog.
    Close {
        outcome: FulfillmentState,
        message: String,
    },
}

/// Terminal outcome reported in a [`DialogAction::Close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}

/// OAuth token pair for a logged-in user.
///
/// The session store holds the authoritative copy per user id; the dialog
/// carries a working copy in its session attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

/// A geographic point produced by geocoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One ride type's price range and pickup ETA.
///
/// Sequences of estimates preserve the provider's order end to end, from
/// the fare response through the rendered summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideEstimate {
    pub ride_type: String,
    pub min_cost_cents: i64,
    pub max_cost_cents: i64,
    pub eta_seconds: i64,
}

/// Lifecycle of a requested ride, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum RideStatus {
    Pending,
    Accepted,
    Arrived,
    PickedUp,
    DroppedOff,
    Canceled,
}

impl RideStatus {
    /// Terminal statuses end the dialog instead of inviting another poll.
    pub fn is_terminal(self) -> bool {
        matches!(self, RideStatus::DroppedOff | RideStatus::Canceled)
    }
}

/// Opaque handle to an in-progress PIN login, issued by `login_start` and
/// consumed by `login_continue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSession(pub String);

/// Single-use code produced by PIN verification, exchanged for tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationCode(pub String);

/// Provider-assigned id of a booked ride.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RideId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}
