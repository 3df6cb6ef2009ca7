// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes.

use crate::diagnostic::ConfigError;
use crate::model::ZednyConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &ZednyConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.portal.session_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "portal.session_id must not be empty".to_string(),
        });
    }

    let level = config.portal.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "portal.log_level `{}` must be one of: {}",
                config.portal.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let origin = config.backend.origin.trim();
    if !is_absolute_http(origin) {
        errors.push(ConfigError::Validation {
            message: format!("backend.origin `{origin}` must start with http:// or https://"),
        });
    }

    if let Some(url) = config.backend.api_url.as_deref().map(str::trim)
        && !url.is_empty()
        && !url.starts_with('/')
        && !is_absolute_http(url)
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "backend.api_url `{url}` must be an http(s) URL or a path starting with `/`"
            ),
        });
    }

    if config.backend.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "backend.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.dashboard.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "dashboard.poll_interval_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_absolute_http(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.len() > scheme.len() && url.starts_with(scheme))
}
