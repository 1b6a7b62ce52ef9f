// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Hailer dialog engine.
//!
//! Exposes the engine as a dialog-codehook endpoint: `POST /v1/turns`
//! takes one NLU turn envelope and returns the dialog action plus the
//! session attributes to carry forward, with a public `GET /health`
//! alongside. Turns are serialized per user id.

pub mod envelope;
pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, start_server};
