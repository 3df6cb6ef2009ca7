// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Zedny client portal.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Zedny configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ZednyConfig {
    /// Portal identity and chat session settings.
    #[serde(default)]
    pub portal: PortalConfig,

    /// Classification backend endpoint settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Staff dashboard settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Portal identity and chat session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PortalConfig {
    /// Display name of the portal.
    #[serde(default = "default_portal_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Session identifier sent with every chat request.
    #[serde(default = "default_session_id")]
    pub session_id: String,

    /// Assistant greeting seeded into a new transcript. `None` starts empty.
    #[serde(default = "default_greeting")]
    pub greeting: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            name: default_portal_name(),
            log_level: default_log_level(),
            session_id: default_session_id(),
            greeting: default_greeting(),
        }
    }
}

fn default_portal_name() -> String {
    "zedny".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_session_id() -> String {
    "default".to_string()
}

fn default_greeting() -> Option<String> {
    Some("Hello! I am ZEdny AI. How can I assist you with your software needs today?".to_string())
}

/// Classification backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Externally supplied base URL. Absolute, or a path joined onto `origin`.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Scheme and authority used to resolve relative base paths.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Base path used when `api_url` is absent.
    #[serde(default = "default_path")]
    pub default_path: String,

    /// Request `{base}/chat/` instead of `{base}/chat` (same for issues).
    #[serde(default = "default_trailing_slash")]
    pub trailing_slash: bool,

    /// Per-request timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            origin: default_origin(),
            default_path: default_path(),
            trailing_slash: default_trailing_slash(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Resolves the base URL the client talks to, without a trailing slash.
    ///
    /// `api_url` wins when set; a value starting with `/` is joined onto
    /// `origin`. Without `api_url`, `origin + default_path` is used.
    pub fn resolved_base_url(&self) -> String {
        let raw = match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() && !url.starts_with('/') => url.to_string(),
            Some(path) if path.starts_with('/') => join_origin(&self.origin, path),
            _ => join_origin(&self.origin, &self.default_path),
        };
        raw.strip_suffix('/').map(str::to_string).unwrap_or(raw)
    }
}

fn join_origin(origin: &str, path: &str) -> String {
    format!(
        "{}/{}",
        origin.trim().trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    )
}

fn default_origin() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_path() -> String {
    "/api".to_string()
}

fn default_trailing_slash() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Staff dashboard configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Seconds between ticket feed polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Include the locally seeded placeholder tickets in the merged list.
    #[serde(default = "default_seed_tickets")]
    pub seed_tickets: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            seed_tickets: default_seed_tickets(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    3
}

fn default_seed_tickets() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_is_origin_plus_api() {
        let backend = BackendConfig::default();
        assert_eq!(backend.resolved_base_url(), "http://127.0.0.1:8000/api");
    }

    #[test]
    fn absolute_api_url_loses_one_trailing_slash() {
        let backend = BackendConfig {
            api_url: Some("https://portal.example.com/api/".into()),
            ..BackendConfig::default()
        };
        assert_eq!(backend.resolved_base_url(), "https://portal.example.com/api");
    }

    #[test]
    fn relative_api_url_joins_origin() {
        let backend = BackendConfig {
            api_url: Some("/v2/api".into()),
            origin: "http://localhost:9000/".into(),
            ..BackendConfig::default()
        };
        assert_eq!(backend.resolved_base_url(), "http://localhost:9000/v2/api");
    }

    #[test]
    fn blank_api_url_falls_back_to_default_path() {
        let backend = BackendConfig {
            api_url: Some("   ".into()),
            ..BackendConfig::default()
        };
        assert_eq!(backend.resolved_base_url(), "http://127.0.0.1:8000/api");
    }
}
