// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./zedny.toml` > `~/.config/zedny/zedny.toml` > `/etc/zedny/zedny.toml`
//! with environment variable overrides via `ZEDNY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use tracing::debug;

use crate::model::ZednyConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/zedny/zedny.toml`
/// 3. `~/.config/zedny/zedny.toml`
/// 4. `./zedny.toml`
/// 5. `ZEDNY_*` environment variables
pub fn load_config() -> Result<ZednyConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ZednyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZednyConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ZednyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ZednyConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ZednyConfig::default()))
        .merge(Toml::file("/etc/zedny/zedny.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("zedny/zedny.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("zedny.toml"))
        .merge(env_provider())
}

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that
/// `ZEDNY_BACKEND_API_URL` maps to `backend.api_url`, not `backend.api.url`.
/// Figment hands the prefix-stripped key over in its original case.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("ZEDNY_").map(|key| {
        let mapped = map_env_key(&key.as_str().to_ascii_lowercase());
        debug!(env = key.as_str(), key = %mapped, "config override from environment");
        mapped.into()
    })
}

/// Maps a lowercased, prefix-stripped env key to its dotted config path.
fn map_env_key(key: &str) -> String {
    for section in ["portal", "backend", "dashboard"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_only_at_section() {
        assert_eq!(map_env_key("backend_api_url"), "backend.api_url");
        assert_eq!(map_env_key("dashboard_poll_interval_secs"), "dashboard.poll_interval_secs");
        assert_eq!(map_env_key("portal_log_level"), "portal.log_level");
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }

    #[test]
    fn env_provider_overrides_api_url() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ZEDNY_BACKEND_API_URL", "http://backend.test/api/");
            jail.set_env("ZEDNY_DASHBOARD_POLL_INTERVAL_SECS", "7");
            let config: ZednyConfig = Figment::new()
                .merge(Serialized::defaults(ZednyConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.backend.api_url.as_deref(), Some("http://backend.test/api/"));
            assert_eq!(config.dashboard.poll_interval_secs, 7);
            Ok(())
        });
    }
}
