//! Configuration tests

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env() -> impl Fn(&str) -> Option<String> {
    env_from(&[])
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// The template written on first run must parse back
#[test]
fn test_config_roundtrip_default() {
    let toml_str = Config::default().to_toml();

    let parsed = Config::parse_file(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let config = Config::from_sources(parsed.expect("parsed"), no_env());
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.theme, DEFAULT_THEME);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    assert!(config.warnings.is_empty());
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.api_base_url = "https://decode.example.com".to_string();
    config.request_timeout_secs = 0;
    config.language = Language::Hindi;
    config.start_dir = Some(PathBuf::from("/tmp/scans"));
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let parsed = Config::parse_file(&config.to_toml()).expect("parse");
    let loaded = Config::from_sources(parsed, no_env());

    assert_eq!(loaded.api_base_url, "https://decode.example.com");
    assert_eq!(loaded.request_timeout_secs, 0);
    assert_eq!(loaded.language, Language::Hindi);
    assert_eq!(loaded.start_dir, Some(PathBuf::from("/tmp/scans")));
    assert!(loaded.logging.file_enabled);
    assert_eq!(loaded.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file = Config::parse_file(
        r#"
api_base_url = "http://file-host:9000"
language = "French"
theme = "Nord"
"#,
    )
    .expect("parse");

    let config = Config::from_sources(
        file,
        env_from(&[
            ("API_BASE_URL", "http://env-host:8000/"),
            ("HEALTH_DECODED_LANG", "spanish"),
        ]),
    );

    assert_eq!(config.api_base_url, "http://env-host:8000");
    assert_eq!(config.language, Language::Spanish);
    assert_eq!(config.theme, "Nord");
}

#[test]
fn test_cli_flag_overrides_env() {
    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("API_BASE_URL", "http://env-host:8000")]),
    )
    .with_api_url(Some("http://flag-host:7000///"));

    assert_eq!(config.api_base_url, "http://flag-host:7000");
}

#[test]
fn test_empty_env_url_falls_back() {
    let config = Config::from_sources(FileConfig::default(), env_from(&[("API_BASE_URL", "  ")]));
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn test_trailing_slashes_stripped() {
    assert_eq!(normalize_base_url("http://x:8000/"), "http://x:8000");
    assert_eq!(normalize_base_url("http://x:8000//"), "http://x:8000");
    assert_eq!(normalize_base_url("http://x:8000/api"), "http://x:8000/api");
}

// ─────────────────────────────────────────────────────────────────────────────
// Bad values
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_language_warns_and_defaults() {
    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("HEALTH_DECODED_LANG", "Klingon")]),
    );
    assert_eq!(config.language, Language::English);
    assert_eq!(config.warnings.len(), 1);
}

#[test]
fn test_bad_timeout_env_uses_file_value() {
    let file = Config::parse_file("request_timeout_secs = 30").expect("parse");
    let config = Config::from_sources(file, env_from(&[("HEALTH_DECODED_TIMEOUT", "soon")]));
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.warnings.len(), 1);
}

#[test]
fn test_malformed_file_is_an_error() {
    assert!(Config::parse_file("api_base_url = http://no-quotes").is_err());
    assert!(Config::parse_file("use_theme_background = \"yes\"").is_err());
}

#[test]
fn test_unknown_rotation_defaults_to_daily() {
    let file = Config::parse_file("[logging]\nfile_rotation = \"weekly\"").expect("parse");
    let config = Config::from_sources(file, no_env());
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}
