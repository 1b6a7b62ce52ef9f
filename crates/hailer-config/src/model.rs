// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Hailer dialog service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Hailer configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HailerConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Dialog policy settings.
    #[serde(default)]
    pub dialog: DialogConfig,

    /// Geocoding provider settings.
    #[serde(default)]
    pub geocode: GeocodeConfig,

    /// Ride provider API settings.
    #[serde(default)]
    pub lyft: LyftConfig,

    /// Credential storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Turn dispatcher HTTP settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "hailer".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Dialog policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DialogConfig {
    /// How many PIN entries a user gets before the dialog is closed as
    /// failed. Must be at least 1.
    #[serde(default = "default_max_pin_attempts")]
    pub max_pin_attempts: u32,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            max_pin_attempts: default_max_pin_attempts(),
        }
    }
}

fn default_max_pin_attempts() -> u32 {
    3
}

/// Geocoding provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeocodeConfig {
    /// Provider API key. `None` sends unauthenticated requests.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_geocode_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            timeout_secs: default_geocode_timeout_secs(),
        }
    }
}

fn default_geocode_timeout_secs() -> u64 {
    10
}

/// Ride provider API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LyftConfig {
    /// OAuth client id. Required to serve.
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret. Required to serve.
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_lyft_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LyftConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            timeout_secs: default_lyft_timeout_secs(),
        }
    }
}

fn default_lyft_timeout_secs() -> u64 {
    10
}

/// Credential storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage backend: "sqlite" or "memory".
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    /// Path to the SQLite database file (ignored by the memory backend).
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            database_path: default_database_path(),
        }
    }
}

fn default_storage_backend() -> String {
    "sqlite".to_string()
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("hailer").join("hailer.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("hailer.db"))
        .to_string_lossy()
        .into_owned()
}

/// Turn dispatcher HTTP configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Address to bind the server to.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind the server to.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    3000
}
