// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles `POST /v1/turns` and `GET /health`.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tokio::sync::Mutex;

use hailer_core::HailerError;

use crate::envelope::{DialogActionEnvelope, TurnRequest, TurnResponse};
use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /v1/turns
///
/// Runs one dialog turn. Turns for the same user are serialized; the
/// session attributes are a read-modify-write cycle and concurrent turns
/// would clobber each other.
pub async fn post_turn(
    State(state): State<GatewayState>,
    Json(request): Json<TurnRequest>,
) -> Response {
    let lock = state
        .user_locks
        .entry(request.user_id.clone())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .value()
        .clone();
    let _turn_guard = lock.lock().await;

    match state.engine.advance(request.to_turn()).await {
        Ok((action, session_attributes)) => {
            let response = TurnResponse {
                session_attributes,
                dialog_action: DialogActionEnvelope::from_action(
                    action,
                    &request.current_intent,
                ),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(error @ (HailerError::Protocol { .. } | HailerError::Validation { .. })) => {
            tracing::warn!(user_id = %request.user_id, %error, "rejected turn");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: error.to_string(),
                }),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!(user_id = %request.user_id, %error, "turn failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal error".to_string(),
                }),
            )
                .into_response()
        }
    }
}
