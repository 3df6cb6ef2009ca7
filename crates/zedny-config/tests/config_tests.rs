// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Zedny configuration system.

use zedny_config::diagnostic::ConfigError;
use zedny_config::model::ZednyConfig;
use zedny_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_zedny_config() {
    let toml = r#"
[portal]
name = "acme-portal"
log_level = "debug"
session_id = "sess-42"
greeting = "Welcome!"

[backend]
api_url = "https://api.acme.test/api/"
origin = "https://acme.test"
default_path = "/backend"
trailing_slash = false
request_timeout_secs = 10

[dashboard]
poll_interval_secs = 5
seed_tickets = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.portal.name, "acme-portal");
    assert_eq!(config.portal.log_level, "debug");
    assert_eq!(config.portal.session_id, "sess-42");
    assert_eq!(config.portal.greeting.as_deref(), Some("Welcome!"));
    assert_eq!(config.backend.api_url.as_deref(), Some("https://api.acme.test/api/"));
    assert_eq!(config.backend.resolved_base_url(), "https://api.acme.test/api");
    assert!(!config.backend.trailing_slash);
    assert_eq!(config.backend.request_timeout_secs, 10);
    assert_eq!(config.dashboard.poll_interval_secs, 5);
    assert!(!config.dashboard.seed_tickets);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.portal.name, "zedny");
    assert_eq!(config.portal.session_id, "default");
    assert!(config.portal.greeting.is_some());
    assert!(config.backend.api_url.is_none());
    assert_eq!(config.backend.resolved_base_url(), "http://127.0.0.1:8000/api");
    assert!(config.backend.trailing_slash);
    assert_eq!(config.dashboard.poll_interval_secs, 3);
    assert!(config.dashboard.seed_tickets);
}

/// Dotted overrides land on the right fields (as env vars would).
#[test]
fn dotted_override_sets_api_url() {
    use figment::{providers::Serialized, Figment};

    let config: ZednyConfig = Figment::new()
        .merge(Serialized::defaults(ZednyConfig::default()))
        .merge(("backend.api_url", "http://override.test/api"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.backend.resolved_base_url(), "http://override.test/api");
}

/// Unknown top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[metrics]
enabled = true
"#;

    let err = load_config_from_str(toml).expect_err("unknown section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("metrics"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unknown key in [backend] produces a suggestion and the valid key list.
#[test]
fn diagnostic_api_ulr_suggests_api_url() {
    let toml = r#"
[backend]
api_ulr = "http://x.test"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let hit = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "api_ulr"
                && suggestion.as_deref() == Some("api_url")
                && valid_keys.contains("trailing_slash")
        })
    });
    assert!(hit, "expected UnknownKey for api_ulr, got: {errors:?}");
}

/// Invalid type (string where number expected) produces an InvalidType diagnostic.
#[test]
fn diagnostic_invalid_type_for_poll_interval() {
    let toml = r#"
[dashboard]
poll_interval_secs = "often"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("poll_interval_secs"))),
        "got: {errors:?}"
    );
}

/// Validation errors surface through load_and_validate_str.
#[test]
fn validation_catches_zero_timeout() {
    let toml = r#"
[backend]
request_timeout_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero timeout should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("request_timeout_secs"))
    }));
}

/// ConfigError renders through miette with its help text.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "seed_tikets".to_string(),
        suggestion: Some("seed_tickets".to_string()),
        valid_keys: "poll_interval_secs, seed_tickets".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `seed_tickets`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("seed_tikets"));
}

/// A config file on disk loads and validates.
#[test]
fn load_and_validate_path_reads_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[dashboard]\npoll_interval_secs = 10").expect("write config");

    let config = zedny_config::load_and_validate_path(file.path()).expect("should load");
    assert_eq!(config.dashboard.poll_interval_secs, 10);
    assert_eq!(config.portal.name, "zedny");
}

/// Unknown keys in a file get the same suggestion as inline sources.
#[test]
fn unknown_key_in_file_suggests_correction() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "[portal]\nname = \"x\"\ngreting = \"hi\"\n").expect("write config");

    let errors = zedny_config::load_and_validate_path(file.path()).expect_err("should fail");
    let located = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, .. }
            if key == "greting" && suggestion.as_deref() == Some("greeting"))
    });
    assert!(located, "got: {errors:?}");
}

/// `ZEDNY_*` variables override the file when loading from a path.
#[test]
fn env_overrides_apply_when_loading_from_path() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("zedny.toml", "[dashboard]\npoll_interval_secs = 10\n")?;
        jail.set_env("ZEDNY_BACKEND_API_URL", "http://backend.test/api");
        jail.set_env("ZEDNY_PORTAL_LOG_LEVEL", "debug");

        let config = zedny_config::load_config_from_path(std::path::Path::new("zedny.toml"))?;
        assert_eq!(config.backend.api_url.as_deref(), Some("http://backend.test/api"));
        assert_eq!(config.backend.resolved_base_url(), "http://backend.test/api");
        assert_eq!(config.portal.log_level, "debug");
        assert_eq!(config.dashboard.poll_interval_secs, 10);
        Ok(())
    });
}
