// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login sub-protocol adapter trait.
//!
//! The login flow is a three-step, SMS-PIN OAuth exchange: start a login
//! session (PIN is sent out of band), verify the PIN the user read back,
//! then exchange the resulting authorization code for a token pair.

use async_trait::async_trait;

use crate::error::HailerError;
use crate::traits::adapter::ServiceAdapter;
use crate::types::{AuthorizationCode, Credentials, LoginSession};

/// Adapter for the PIN-based login sub-protocol.
#[async_trait]
pub trait LoginAdapter: ServiceAdapter {
    /// Begins a login for the user, triggering out-of-band PIN delivery.
    /// The returned session handle must be presented to `login_continue`.
    async fn login_start(&self, user_id: &str) -> Result<LoginSession, HailerError>;

    /// Submits the PIN the user entered. `Ok(None)` means the provider
    /// rejected the PIN; the call itself succeeded.
    async fn login_continue(
        &self,
        session: &LoginSession,
        pin: &str,
    ) -> Result<Option<AuthorizationCode>, HailerError>;

    /// Exchanges an authorization code for an access/refresh token pair.
    async fn exchange_token(&self, code: &AuthorizationCode) -> Result<Credentials, HailerError>;
}
