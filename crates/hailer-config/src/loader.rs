// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hailer.toml` > `~/.config/hailer/hailer.toml` > `/etc/hailer/hailer.toml`
//! with environment variable overrides via `HAILER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HailerConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hailer/hailer.toml` (system-wide)
/// 3. `~/.config/hailer/hailer.toml` (user XDG config)
/// 4. `./hailer.toml` (local directory)
/// 5. `HAILER_*` environment variables
pub fn load_config() -> Result<HailerConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HailerConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HailerConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HailerConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HailerConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HailerConfig::default()))
        .merge(Toml::file("/etc/hailer/hailer.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("hailer/hailer.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("hailer.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `HAILER_LYFT_CLIENT_ID` must
/// map to `lyft.client_id`, not `lyft.client.id`.
fn env_provider() -> Env {
    Env::prefixed("HAILER_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: HAILER_LYFT_CLIENT_ID -> "lyft_client_id"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("dialog_", "dialog.", 1)
            .replacen("geocode_", "geocode.", 1)
            .replacen("lyft_", "lyft.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}

