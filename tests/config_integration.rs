use serial_test::serial;
use std::env;
use std::fs;
use webhook_feed::config::{LogFormat, ViewerConfig};

const BIN: &str = "webhook-feed";

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("FEED_CONFIG_FILE");
        env::remove_var("FEED_BASE_URL");
        env::remove_var("FEED_BACKEND__BASE_URL");
        env::remove_var("FEED_BACKEND__REQUEST_TIMEOUT_SECS");
        env::remove_var("FEED_VIEW__HEIGHT");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = ViewerConfig::load_from_args([BIN]).expect("defaults should load");
    assert_eq!(config.backend.base_url, "http://localhost:5000/");
    assert_eq!(config.backend.request_timeout_secs, 10);
    assert_eq!(config.view.initial_search, "");
    assert_eq!(config.view.height, 20);
    assert!(config.view.pretty_json);
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(config.logging.filter, "info");
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("FEED_BACKEND__BASE_URL", "http://receiver:8080/");
        env::set_var("FEED_VIEW__HEIGHT", "5");
    }

    let config = ViewerConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.backend.base_url, "http://receiver:8080/");
    assert_eq!(config.view.height, 5);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("viewer.yaml");
    fs::write(
        &file_path,
        r#"
backend:
  base_url: "https://hooks.example.com/receiver/"
  request_timeout_secs: 3
view:
  initial_search: "order"
logging:
  format: json
"#,
    )
    .expect("Failed to write temp config");

    let config = ViewerConfig::load_from_args([BIN, "--config", file_path.to_str().unwrap()])
        .expect("Failed to load config from file");
    assert_eq!(
        config.backend.base_url,
        "https://hooks.example.com/receiver/"
    );
    assert_eq!(config.backend.request_timeout().as_secs(), 3);
    assert_eq!(config.view.initial_search, "order");
    assert_eq!(config.view.height, 20);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    let result = ViewerConfig::load_from_args([BIN, "--config", missing.to_str().unwrap()]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_cli_beats_env_and_file() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("viewer.toml");
    fs::write(
        &file_path,
        r#"
[backend]
base_url = "http://from-file:5000/"

[view]
height = 7
"#,
    )
    .unwrap();

    unsafe {
        env::set_var("FEED_BACKEND__BASE_URL", "http://from-env:5000/");
    }

    let config = ViewerConfig::load_from_args([
        BIN,
        "--config",
        file_path.to_str().unwrap(),
        "--base-url",
        "http://from-cli:5000/",
        "--search",
        "a & b",
        "--log-format",
        "JSON",
    ])
    .expect("Failed to load config");

    assert_eq!(config.backend.base_url, "http://from-cli:5000/");
    assert_eq!(config.view.height, 7);
    assert_eq!(config.view.initial_search, "a & b");
    assert_eq!(config.logging.format, LogFormat::Json);

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_beats_file() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("viewer.yaml");
    fs::write(&file_path, "backend:\n  request_timeout_secs: 30\n").unwrap();

    unsafe {
        env::set_var("FEED_BACKEND__REQUEST_TIMEOUT_SECS", "2");
    }

    let config = ViewerConfig::load_from_args([BIN, "--config", file_path.to_str().unwrap()])
        .expect("Failed to load config");
    assert_eq!(config.backend.request_timeout_secs, 2);

    clear_env_vars();
}

#[test]
#[serial]
fn test_bad_log_format_is_rejected() {
    clear_env_vars();

    let result = ViewerConfig::load_from_args([BIN, "--log-format", "xml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_zero_request_timeout_is_rejected() {
    clear_env_vars();
    unsafe {
        env::set_var("FEED_BACKEND__REQUEST_TIMEOUT_SECS", "0");
    }

    let err = ViewerConfig::load_from_args([BIN]).unwrap_err();
    assert!(err.to_string().contains("request_timeout_secs"));

    clear_env_vars();
}
