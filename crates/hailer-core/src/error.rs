// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hailer dialog service.

use thiserror::Error;

/// The primary error type used across all Hailer adapter traits and the
/// dialog engine.
#[derive(Debug, Error)]
pub enum HailerError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// User input an upstream service rejected (address not found, PIN
    /// refused). Always recoverable by re-prompting the same slot.
    #[error("validation failure: {message}")]
    Validation { message: String },

    /// A leaf service call failed (network error, auth, non-2xx response).
    /// Recoverable everywhere except the final booking step.
    #[error("upstream error from {service}: {message}")]
    Upstream {
        service: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A malformed or unroutable turn. Fatal for the request; surfaced to
    /// the dispatcher instead of being converted into a dialog action.
    #[error("protocol violation: {message}")]
    Protocol { message: String },

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HailerError {
    /// Whether the dialog engine may convert this error into a re-prompt
    /// instead of failing the turn.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HailerError::Validation { .. } | HailerError::Upstream { .. }
        )
    }

    /// Validation failure from a message.
    pub fn validation(message: impl Into<String>) -> Self {
        HailerError::Validation {
            message: message.into(),
        }
    }

    /// Upstream failure without an underlying source error.
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        HailerError::Upstream {
            service: service.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Protocol violation from a message.
    pub fn protocol(message: impl Into<String>) -> Self {
        HailerError::Protocol {
            message: message.into(),
        }
    }
}
