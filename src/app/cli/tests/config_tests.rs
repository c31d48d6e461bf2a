//! Configuration file tests

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::app::cli::config::*;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_load_full_file() {
    let file = write_config(
        r#"
[logging]
level = "debug"
format = "json"
color = false

[scanner]
business_id = "shop-1"
scanned_by = "desk"
auto_accept_duplicates = true

[cache]
ttl_seconds = 5
"#,
    );

    let config = Config::load(Some(file.path())).await.unwrap();

    assert_eq!(config.logging.level.as_deref(), Some("debug"));
    assert_eq!(config.logging.format.as_deref(), Some("json"));
    assert_eq!(config.logging.color, Some(false));
    assert_eq!(config.scanner.business_id.as_deref(), Some("shop-1"));
    assert!(config.scanner.auto_accept_duplicates);
    assert!(config.scanner.scanned_by_email.is_none());
    assert_eq!(config.cache_ttl(), Some(Duration::from_secs(5)));
}

#[tokio::test]
async fn test_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = Config::load(Some(missing.as_path())).await.unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[test]
fn test_defaults() {
    let config = Config::from_toml_str("", Path::new("empty.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(
        config.cache_ttl(),
        Some(Duration::from_secs(DEFAULT_CACHE_TTL_SECONDS))
    );
}

#[test]
fn test_unknown_keys_rejected() {
    let err = Config::from_toml_str("[scanner]\nbusiness = \"x\"\n", Path::new("bad.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));

    let err = Config::from_toml_str("[printer]\nname = \"x\"\n", Path::new("bad.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_invalid_values_rejected() {
    let err = Config::from_toml_str("[logging]\nlevel = \"loud\"\n", Path::new("c.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let err = Config::from_toml_str("[cache]\nttl_seconds = 0\n", Path::new("c.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn test_disabled_cache_has_no_ttl() {
    let config = Config::from_toml_str(
        "[cache]\nenabled = false\nttl_seconds = 0\n",
        Path::new("c.toml"),
    )
    .unwrap();
    assert_eq!(config.cache_ttl(), None);
}
