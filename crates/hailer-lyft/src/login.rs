// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Three-step PIN login against the Lyft API.
//!
//! 1. `phone_register` - announce the phone number; the provider texts a
//!    PIN and returns an opaque login session handle.
//! 2. `phone_verify` - present the PIN the user read back; a rejected PIN
//!    is `Ok(None)`, not an error.
//! 3. `exchange_code` - trade the resulting authorization code for an
//!    access/refresh token pair.
//!
//! None of these steps retry: a repeated register would text a second PIN
//! and a repeated verify would burn the attempt the user just made.

use hailer_core::{AuthorizationCode, Credentials, HailerError, LoginSession};
use tracing::debug;

use crate::client::LyftClient;
use crate::types::{PhoneRegisterRequest, PhoneRegisterResponse, PhoneVerifyRequest, PhoneVerifyResponse, TokenResponse};

impl LyftClient {
    /// Step 1: begin a login session for a phone number. The provider
    /// delivers the PIN out of band.
    pub async fn phone_register(&self, phone: &str) -> Result<LoginSession, HailerError> {
        let response = self
            .client
            .post(format!("{}/v1/phone/register", self.base_url))
            .json(&PhoneRegisterRequest {
                phone: phone.to_string(),
            })
            .send()
            .await
            .map_err(|e| HailerError::Upstream {
                service: "lyft-login".into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "phone register response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HailerError::upstream(
                "lyft-login",
                format!("phone register returned {status}: {body}"),
            ));
        }

        let body: PhoneRegisterResponse =
            response.json().await.map_err(|e| HailerError::Upstream {
                service: "lyft-login".into(),
                message: format!("failed to parse register response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(LoginSession(body.login_session))
    }

    /// Step 2: present the PIN. A 4xx response means the provider rejected
    /// the PIN (wrong digits, expired session) and maps to `Ok(None)`;
    /// only transport failures and 5xx responses are errors.
    pub async fn phone_verify(
        &self,
        session: &LoginSession,
        pin: &str,
    ) -> Result<Option<AuthorizationCode>, HailerError> {
        let response = self
            .client
            .post(format!("{}/v1/phone/verify", self.base_url))
            .json(&PhoneVerifyRequest {
                login_session: session.0.clone(),
                code: pin.to_string(),
            })
            .send()
            .await
            .map_err(|e| HailerError::Upstream {
                service: "lyft-login".into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "phone verify response received");

        if status.is_success() {
            let body: PhoneVerifyResponse =
                response.json().await.map_err(|e| HailerError::Upstream {
                    service: "lyft-login".into(),
                    message: format!("failed to parse verify response: {e}"),
                    source: Some(Box::new(e)),
                })?;
            return Ok(Some(AuthorizationCode(body.authorization_code)));
        }

        // 429 is load shedding, not a judgement on the PIN.
        if status.is_client_error() && status.as_u16() != 429 {
            debug!(status = %status, "provider rejected the PIN");
            return Ok(None);
        }

        let body = response.text().await.unwrap_or_default();
        Err(HailerError::upstream(
            "lyft-login",
            format!("phone verify returned {status}: {body}"),
        ))
    }

    /// Step 3: exchange the authorization code for a token pair.
    pub async fn exchange_code(
        &self,
        code: &AuthorizationCode,
    ) -> Result<Credentials, HailerError> {
        let response = self
            .client
            .post(format!("{}/oauth/token", self.base_url))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code.0.as_str()),
            ])
            .send()
            .await
            .map_err(|e| HailerError::Upstream {
                service: "lyft-login".into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "token exchange response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HailerError::upstream(
                "lyft-login",
                format!("token exchange returned {status}: {body}"),
            ));
        }

        let token: TokenResponse = response.json().await.map_err(|e| HailerError::Upstream {
            service: "lyft-login".into(),
            message: format!("failed to parse token response: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Credentials {
            access_token: token.access_token,
            refresh_token: token.refresh_token.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: &str) -> LyftClient {
        LyftClient::new("test-id".into(), "test-secret".into(), Duration::from_secs(5))
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    #[tokio::test]
    async fn phone_register_returns_session_handle() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/phone/register"))
            .and(body_string_contains("\"phone\":\"15555550100\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"login_session": "sess-abc"}),
            ))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let session = client.phone_register("15555550100").await.unwrap();
        assert_eq!(session, LoginSession("sess-abc".into()));
    }

    #[tokio::test]
    async fn phone_verify_returns_code_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/phone/verify"))
            .and(body_string_contains("\"login_session\":\"sess-abc\""))
            .and(body_string_contains("\"code\":\"1234\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"authorization_code": "auth-xyz"}),
            ))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let code = client
            .phone_verify(&LoginSession("sess-abc".into()), "1234")
            .await
            .unwrap();
        assert_eq!(code, Some(AuthorizationCode("auth-xyz".into())));
    }

    #[tokio::test]
    async fn phone_verify_maps_rejection_to_none() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/phone/verify"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let code = client
            .phone_verify(&LoginSession("sess-abc".into()), "9999")
            .await
            .unwrap();
        assert_eq!(code, None, "a rejected PIN is not an error");
    }

    #[tokio::test]
    async fn phone_verify_surfaces_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/phone/verify"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .phone_verify(&LoginSession("sess-abc".into()), "1234")
            .await
            .unwrap_err();
        assert!(matches!(err, HailerError::Upstream { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn exchange_code_returns_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=auth-xyz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "user-at",
                "refresh_token": "user-rt"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let creds = client
            .exchange_code(&AuthorizationCode("auth-xyz".into()))
            .await
            .unwrap();
        assert_eq!(creds.access_token, "user-at");
        assert_eq!(creds.refresh_token, "user-rt");
    }

    #[tokio::test]
    async fn exchange_code_rejection_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .exchange_code(&AuthorizationCode("stale".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, HailerError::Upstream { .. }), "got: {err}");
    }
}
