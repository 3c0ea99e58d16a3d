//! Tests for layered configuration loading.

use parley_server::{ParleyConfig, is_authenticated, verify_password};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_file_overrides_bundled_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("parley.toml");
    std::fs::write(
        &path,
        r#"
[server]
port = 8080

[auth]
password = "hunter2"
secure_cookie = true
"#,
    )
    .unwrap();

    let config = ParleyConfig::from_file(&path).unwrap();
    let defaults = ParleyConfig::default();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, defaults.server.host);
    assert_eq!(config.storage.data_dir, PathBuf::from("./conversations"));
    assert_eq!(config.auth.password(), Some("hunter2"));
    assert!(config.auth.secure_cookie);
    assert_eq!(config.auth.cookie_max_age_secs, 604_800);
    assert!(!config.logging.json);
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    assert!(ParleyConfig::from_file(temp_dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_socket_addr() {
    let mut config = ParleyConfig::default();
    assert_eq!(config.server.socket_addr().unwrap().to_string(), "127.0.0.1:3000");

    config.server.host = "not a host".to_string();
    let err = config.server.socket_addr().unwrap_err();
    assert!(err.to_string().contains("Invalid listen address not a host:3000"));
}

#[test]
fn test_password_checks() {
    let mut config = ParleyConfig::default();
    config.auth.password = Some(String::new());
    assert!(verify_password(&config.auth, "").is_err());

    config.auth.password = Some("pw".to_string());
    assert!(verify_password(&config.auth, "pw").is_ok());
    assert!(verify_password(&config.auth, "PW").is_err());
}

#[test]
fn test_cookie_parsing() {
    let mut headers = axum::http::HeaderMap::new();
    assert!(!is_authenticated(&headers));

    headers.insert(axum::http::header::COOKIE, "a=1; authenticated=true".parse().unwrap());
    assert!(is_authenticated(&headers));
}
