// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire envelope for the turn endpoint.
//!
//! The request and response shapes follow the dialog-codehook convention
//! of the upstream NLU layer: camelCase fields, slots echoed back on every
//! response, and plain-text messages wrapped in `{contentType, content}`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use hailer_core::{ConfirmationStatus, DialogAction, FulfillmentState, SessionAttributes, Turn};

/// Request body for `POST /v1/turns`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub current_intent: CurrentIntent,
    pub user_id: String,
    #[serde(default)]
    pub session_attributes: SessionAttributes,
}

/// The intent as the NLU layer resolved it this turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIntent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Option<String>>,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
}

impl TurnRequest {
    /// Converts the envelope into the engine's turn type. The slot map is
    /// cloned because the response must echo the request's slots back.
    pub fn to_turn(&self) -> Turn {
        Turn {
            intent_name: self.current_intent.name.clone(),
            user_id: self.user_id.clone(),
            slots: self.current_intent.slots.clone(),
            session_attributes: self.session_attributes.clone(),
            confirmation_status: self.current_intent.confirmation_status,
        }
    }
}

/// Response body for `POST /v1/turns`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub session_attributes: SessionAttributes,
    pub dialog_action: DialogActionEnvelope,
}

/// A plain-text message for the user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: &'static str,
    pub content: String,
}

impl Message {
    fn plain(content: String) -> Self {
        Self {
            content_type: "PlainText",
            content,
        }
    }
}

/// The dialog action in wire form, tagged by `type`.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum DialogActionEnvelope {
    #[serde(rename_all = "camelCase")]
    ElicitSlot {
        intent_name: String,
        slots: HashMap<String, Option<String>>,
        slot_to_elicit: String,
        message: Message,
    },
    #[serde(rename_all = "camelCase")]
    ConfirmIntent {
        intent_name: String,
        slots: HashMap<String, Option<String>>,
        message: Message,
    },
    #[serde(rename_all = "camelCase")]
    Delegate {
        slots: HashMap<String, Option<String>>,
    },
    #[serde(rename_all = "camelCase")]
    Close {
        fulfillment_state: FulfillmentState,
        message: Message,
    },
}

impl DialogActionEnvelope {
    /// Wraps an engine action for the wire, echoing the request's intent
    /// name and slots where the action shape calls for them.
    pub fn from_action(action: DialogAction, intent: &CurrentIntent) -> Self {
        match action {
            DialogAction::ElicitSlot { slot_name, prompt } => Self::ElicitSlot {
                intent_name: intent.name.clone(),
                slots: intent.slots.clone(),
                slot_to_elicit: slot_name,
                message: Message::plain(prompt),
            },
            DialogAction::ConfirmIntent { prompt } => Self::ConfirmIntent {
                intent_name: intent.name.clone(),
                slots: intent.slots.clone(),
                message: Message::plain(prompt),
            },
            DialogAction::Delegate => Self::Delegate {
                slots: intent.slots.clone(),
            },
            DialogAction::Close { outcome, message } => Self::Close {
                fulfillment_state: outcome,
                message: Message::plain(message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_the_camel_case_envelope() {
        let raw = r#"{
            "currentIntent": {
                "name": "BookLyft",
                "slots": {"LyftPIN": null, "PickupAddress": "30th St"},
                "confirmationStatus": "Denied"
            },
            "userId": "15555550100",
            "sessionAttributes": {"state": "AwaitingPin"}
        }"#;
        let request: TurnRequest = serde_json::from_str(raw).unwrap();

        assert_eq!(request.current_intent.name, "BookLyft");
        assert_eq!(
            request.current_intent.confirmation_status,
            ConfirmationStatus::Denied
        );
        assert_eq!(request.current_intent.slots["LyftPIN"], None);
        assert_eq!(
            request.session_attributes.get("state").map(String::as_str),
            Some("AwaitingPin")
        );

        let turn = request.to_turn();
        assert_eq!(turn.slot("PickupAddress"), Some("30th St"));
        assert_eq!(turn.slot("LyftPIN"), None);
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = r#"{"currentIntent": {"name": "BookLyft"}, "userId": "u"}"#;
        let request: TurnRequest = serde_json::from_str(raw).unwrap();
        assert!(request.current_intent.slots.is_empty());
        assert_eq!(
            request.current_intent.confirmation_status,
            ConfirmationStatus::None
        );
        assert!(request.session_attributes.is_empty());
    }

    #[test]
    fn unknown_confirmation_status_is_rejected() {
        let raw = r#"{
            "currentIntent": {"name": "BookLyft", "confirmationStatus": "Maybe"},
            "userId": "u"
        }"#;
        assert!(serde_json::from_str::<TurnRequest>(raw).is_err());
    }

    #[test]
    fn elicit_slot_serializes_with_echoed_slots() {
        let intent = CurrentIntent {
            name: "BookLyft".into(),
            slots: HashMap::from([("LyftPIN".to_string(), None)]),
            confirmation_status: ConfirmationStatus::None,
        };
        let envelope = DialogActionEnvelope::from_action(
            DialogAction::ElicitSlot {
                slot_name: "LyftPIN".into(),
                prompt: "say the 4 digits".into(),
            },
            &intent,
        );

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["type"], "ElicitSlot");
        assert_eq!(value["intentName"], "BookLyft");
        assert_eq!(value["slotToElicit"], "LyftPIN");
        assert_eq!(value["slots"], serde_json::json!({"LyftPIN": null}));
        assert_eq!(value["message"]["contentType"], "PlainText");
        assert_eq!(value["message"]["content"], "say the 4 digits");
    }

    #[test]
    fn close_serializes_the_fulfillment_state() {
        let intent = CurrentIntent {
            name: "BookLyft".into(),
            slots: HashMap::new(),
            confirmation_status: ConfirmationStatus::None,
        };
        let envelope = DialogActionEnvelope::from_action(
            DialogAction::Close {
                outcome: FulfillmentState::Fulfilled,
                message: "done".into(),
            },
            &intent,
        );

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["type"], "Close");
        assert_eq!(value["fulfillmentState"], "Fulfilled");
        assert_eq!(value["message"]["content"], "done");
    }

    #[test]
    fn delegate_serializes_only_the_slots() {
        let intent = CurrentIntent {
            name: "BookLyft".into(),
            slots: HashMap::from([("RideType".to_string(), Some("Lyft".to_string()))]),
            confirmation_status: ConfirmationStatus::Denied,
        };
        let envelope =
            DialogActionEnvelope::from_action(DialogAction::Delegate, &intent);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["type"], "Delegate");
        assert_eq!(value["slots"]["RideType"], "Lyft");
        assert!(value.get("message").is_none());
    }
}
