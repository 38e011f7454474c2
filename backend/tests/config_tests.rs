//! Tests for configuration loading - files and environment overrides.

mod support;

use std::io::Write;

use brewery_rest::config::{AppConfig, ConfigError};
use tempfile::NamedTempFile;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_explicit_path() {
    let file = config_file(
        r#"
[server]
host = "127.0.0.1"
port = 9000

[repository]
seed_sample_data = false
"#,
    );
    let path = file.path().to_str().unwrap();

    let config = support::with_scoped_env(
        &[
            ("BREWERY_CONFIG", Some(path)),
            ("HOST", None),
            ("PORT", None),
            ("BREWERY_SEED_DATA", None),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.server.bind_address(), "127.0.0.1:9000");
    assert!(!config.repository.seed_sample_data);
    assert_eq!(config.paging.max_page_size, 100);
}

#[test]
fn test_env_overrides_file() {
    let file = config_file("[server]\nport = 9000\n");
    let path = file.path().to_str().unwrap();

    let config = support::with_scoped_env(
        &[
            ("BREWERY_CONFIG", Some(path)),
            ("HOST", Some("localhost")),
            ("PORT", Some("7070")),
            ("BREWERY_SEED_DATA", Some("off")),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.server.host, "localhost");
    assert_eq!(config.server.port, 7070);
    assert!(!config.repository.seed_sample_data);
}

#[test]
fn test_invalid_port_is_reported() {
    let err = support::with_scoped_env(
        &[("PORT", Some("eighty")), ("HOST", None), ("BREWERY_SEED_DATA", None)],
        || AppConfig::default().with_env_overrides(),
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidEnv { key: "PORT", .. }));
}

#[test]
fn test_invalid_seed_flag_is_reported() {
    let err = support::with_scoped_env(
        &[("BREWERY_SEED_DATA", Some("maybe")), ("HOST", None), ("PORT", None)],
        || AppConfig::default().with_env_overrides(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ConfigError::InvalidEnv {
            key: "BREWERY_SEED_DATA",
            ..
        }
    ));
}

#[test]
fn test_missing_file_is_read_error() {
    let err = support::with_scoped_env(
        &[("BREWERY_CONFIG", Some("/nonexistent/brewery.toml"))],
        AppConfig::load,
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = config_file("[server\nport = ");
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
