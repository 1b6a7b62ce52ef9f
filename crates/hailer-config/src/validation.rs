// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, known backend names, and positive retry limits.

use crate::diagnostic::ConfigError;
use crate::model::HailerConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const VALID_STORAGE_BACKENDS: &[&str] = &["sqlite", "memory"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HailerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate log_level is a known tracing level
    let level = config.service.log_level.trim();
    if !VALID_LOG_LEVELS.contains(&level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{level}` is not one of trace, debug, info, warn, error"
            ),
        });
    }

    // Validate the PIN retry bound leaves the user at least one attempt
    if config.dialog.max_pin_attempts < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "dialog.max_pin_attempts must be at least 1, got {}",
                config.dialog.max_pin_attempts
            ),
        });
    }

    // Validate client timeouts are non-zero
    if config.geocode.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "geocode.timeout_secs must be at least 1".to_string(),
        });
    }
    if config.lyft.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "lyft.timeout_secs must be at least 1".to_string(),
        });
    }

    // Validate storage backend is one we ship
    let backend = config.storage.backend.trim();
    if !VALID_STORAGE_BACKENDS.contains(&backend) {
        errors.push(ConfigError::Validation {
            message: format!("storage.backend `{backend}` is not one of sqlite, memory"),
        });
    }

    // Validate database_path is not empty (the sqlite backend needs it)
    if backend == "sqlite" && config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate gateway.host is not empty
    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    // Validate gateway.host looks like a valid IP or hostname
    if !config.gateway.host.trim().is_empty() {
        let addr = config.gateway.host.trim();
        // Accept valid IPv4, IPv6, or hostname patterns
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{addr}` is not a valid IP address or hostname"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
