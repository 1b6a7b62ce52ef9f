// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hailer ride-booking dialog service.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Hailer workspace. All service adapters
//! implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HailerError;
pub use types::{
    AuthorizationCode, BOOK_RIDE_INTENT, ConfirmationStatus, Coordinates, Credentials,
    DialogAction, FulfillmentState, HealthStatus, LoginSession, RideEstimate, RideId, RideStatus,
    SessionAttributes, Turn, slots,
};

// Re-export all adapter traits at crate root.
pub use traits::{
    FareAdapter, GeocodeAdapter, LoginAdapter, RideAdapter, ServiceAdapter, SessionStore,
};

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::str::FromStr;

    use super::*;

    #[test]
    fn hailer_error_has_all_variants() {
        // Verify all 6 error variants exist and can be constructed.
        let _config = HailerError::Config("test".into());
        let _validation = HailerError::Validation {
            message: "test".into(),
        };
        let _upstream = HailerError::Upstream {
            service: "geocode".into(),
            message: "test".into(),
            source: None,
        };
        let _protocol = HailerError::Protocol {
            message: "test".into(),
        };
        let _storage = HailerError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _internal = HailerError::Internal("test".into());
    }

    #[test]
    fn only_validation_and_upstream_are_recoverable() {
        assert!(HailerError::validation("no match").is_recoverable());
        assert!(HailerError::upstream("fares", "503").is_recoverable());
        assert!(!HailerError::protocol("bad intent").is_recoverable());
        assert!(!HailerError::Config("bad".into()).is_recoverable());
        assert!(!HailerError::Internal("bug".into()).is_recoverable());
    }

    #[test]
    fn ride_status_round_trips_as_camel_case() {
        let statuses = [
            RideStatus::Pending,
            RideStatus::Accepted,
            RideStatus::Arrived,
            RideStatus::PickedUp,
            RideStatus::DroppedOff,
            RideStatus::Canceled,
        ];
        assert_eq!(statuses.len(), 6, "RideStatus must have exactly 6 variants");

        for status in &statuses {
            let s = status.to_string();
            let parsed = RideStatus::from_str(&s).expect("should parse back");
            assert_eq!(*status, parsed);
        }

        // The provider wire format is camelCase.
        let json = serde_json::to_string(&RideStatus::PickedUp).expect("should serialize");
        assert_eq!(json, "\"pickedUp\"");
        assert_eq!(RideStatus::PickedUp.to_string(), "pickedUp");
    }

    #[test]
    fn only_dropped_off_and_canceled_are_terminal() {
        assert!(RideStatus::DroppedOff.is_terminal());
        assert!(RideStatus::Canceled.is_terminal());
        assert!(!RideStatus::Pending.is_terminal());
        assert!(!RideStatus::Accepted.is_terminal());
        assert!(!RideStatus::Arrived.is_terminal());
        assert!(!RideStatus::PickedUp.is_terminal());
    }

    #[test]
    fn confirmation_status_defaults_to_none() {
        assert_eq!(ConfirmationStatus::default(), ConfirmationStatus::None);
        let parsed = ConfirmationStatus::from_str("Denied").expect("should parse");
        assert_eq!(parsed, ConfirmationStatus::Denied);
    }

    #[test]
    fn turn_slot_treats_null_and_blank_as_unfilled() {
        let mut slot_map = HashMap::new();
        slot_map.insert(slots::PICKUP_ADDRESS.to_string(), None);
        slot_map.insert(slots::DROPOFF_ADDRESS.to_string(), Some("  ".to_string()));
        slot_map.insert(
            slots::RIDE_TYPE.to_string(),
            Some("  Lyft Line ".to_string()),
        );

        let turn = Turn {
            intent_name: BOOK_RIDE_INTENT.to_string(),
            user_id: "15555550100".to_string(),
            slots: slot_map,
            session_attributes: SessionAttributes::new(),
            confirmation_status: ConfirmationStatus::None,
        };

        assert_eq!(turn.slot(slots::PICKUP_ADDRESS), None);
        assert_eq!(turn.slot(slots::DROPOFF_ADDRESS), None);
        assert_eq!(turn.slot(slots::RIDE_TYPE), Some("Lyft Line"));
        assert_eq!(turn.slot("NoSuchSlot"), None);
    }

    #[test]
    fn slot_names_match_the_nlu_model() {
        // These strings are the wire contract with the NLU layer; changing
        // one silently breaks existing bots.
        assert_eq!(slots::LYFT_PIN, "LyftPIN");
        assert_eq!(slots::PICKUP_ADDRESS, "PickupAddress");
        assert_eq!(slots::PICKUP_ADDRESS_CONFIRM, "PickupAddressConfirm");
        assert_eq!(slots::DROPOFF_ADDRESS, "DropoffAddress");
        assert_eq!(slots::DROPOFF_ADDRESS_CONFIRM, "DropoffAddressConfirm");
        assert_eq!(slots::RIDE_TYPE, "RideType");
        assert_eq!(slots::CONFIRMATION, "Confirmation");
        assert_eq!(BOOK_RIDE_INTENT, "BookLyft");
    }

    #[test]
    fn ride_estimate_serializes_for_the_attribute_bag() {
        let estimate = RideEstimate {
            ride_type: "Lyft".into(),
            min_cost_cents: 1100,
            max_cost_cents: 1500,
            eta_seconds: 300,
        };
        let json = serde_json::to_string(&estimate).expect("should serialize");
        let parsed: RideEstimate = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(estimate, parsed);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // This test verifies that all adapter trait modules compile and are
        // accessible through the public API. If any module is missing or
        // has a compile error, this test won't compile.
        fn _assert_service_adapter<T: ServiceAdapter>() {}
        fn _assert_geocode_adapter<T: GeocodeAdapter>() {}
        fn _assert_fare_adapter<T: FareAdapter>() {}
        fn _assert_ride_adapter<T: RideAdapter>() {}
        fn _assert_login_adapter<T: LoginAdapter>() {}
        fn _assert_session_store<T: SessionStore>() {}
    }
}
