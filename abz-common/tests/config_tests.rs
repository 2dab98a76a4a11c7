//! Configuration resolution tests
//!
//! Tests that touch ABZ_CONFIG are marked #[serial] so they do not race on
//! the process environment.

use abz_common::config::{
    ClientConfig, ConfigOverrides, TomlConfig, CONFIG_ENV_VAR, DEFAULT_EXTENSIONS,
    DEFAULT_EXTRACTOR, DEFAULT_HOST,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[test]
fn test_defaults_when_nothing_configured() {
    let config = ClientConfig::resolve(ConfigOverrides::default(), TomlConfig::default()).unwrap();

    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.extractor_path, PathBuf::from(DEFAULT_EXTRACTOR));
    assert!(config.profile_file.is_none());
    assert_eq!(config.extensions.len(), DEFAULT_EXTENSIONS.len());
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.logging.level, "info");
    assert!(config.database_path.ends_with("filelog.db"));
}

#[test]
fn test_toml_values_are_used() {
    let toml = TomlConfig::parse(
        r#"
        extractor_path = "/opt/essentia/streaming_extractor_music"
        host = "localhost:8080"
        cache_dir = "/tmp/abz-cache"
        database_path = "/tmp/abz.db"
        extensions = [".FLAC", "mp3"]
        timeout_secs = 5

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    let config = ClientConfig::resolve(ConfigOverrides::default(), toml).unwrap();

    assert_eq!(
        config.extractor_path,
        PathBuf::from("/opt/essentia/streaming_extractor_music")
    );
    assert_eq!(config.host, "localhost:8080");
    assert_eq!(config.cache_dir, PathBuf::from("/tmp/abz-cache"));
    assert_eq!(config.database_path, PathBuf::from("/tmp/abz.db"));
    assert_eq!(config.extensions, vec!["flac".to_string(), "mp3".to_string()]);
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_overrides_take_precedence_over_toml() {
    let toml = TomlConfig::parse(
        r#"
        host = "from-file.example"
        cache_dir = "/tmp/from-file"
        "#,
    )
    .unwrap();
    let overrides = ConfigOverrides {
        host: Some("from-cli.example".to_string()),
        ..Default::default()
    };

    let config = ClientConfig::resolve(overrides, toml).unwrap();

    assert_eq!(config.host, "from-cli.example");
    assert_eq!(config.cache_dir, PathBuf::from("/tmp/from-file"));
}

#[test]
fn test_empty_extension_list_is_rejected() {
    let toml = TomlConfig::parse("extensions = []").unwrap();
    assert!(ClientConfig::resolve(ConfigOverrides::default(), toml).is_err());
}

#[test]
fn test_zero_timeout_is_rejected() {
    let toml = TomlConfig::parse("timeout_secs = 0").unwrap();
    assert!(ClientConfig::resolve(ConfigOverrides::default(), toml).is_err());
}

#[test]
fn test_malformed_toml_is_an_error() {
    assert!(TomlConfig::parse("host = [unclosed").is_err());
}

#[test]
fn test_extensions_are_normalized() {
    let toml = TomlConfig::parse(r#"extensions = [".FLAC", " mp3 ", "Ogg"]"#).unwrap();
    let config = ClientConfig::resolve(ConfigOverrides::default(), toml).unwrap();

    assert_eq!(config.extensions, vec!["flac", "mp3", "ogg"]);
}

#[test]
#[serial]
fn test_discover_explicit_path() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "host = \"explicit.example\"\n").unwrap();

    let toml = TomlConfig::discover(Some(&path)).unwrap();
    assert_eq!(toml.host.as_deref(), Some("explicit.example"));
}

#[test]
#[serial]
fn test_discover_missing_explicit_path_fails() {
    env::remove_var(CONFIG_ENV_VAR);
    let result = TomlConfig::discover(Some(Path::new("/nonexistent/abz/config.toml")));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_discover_env_var() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.toml");
    std::fs::write(&path, "host = \"env.example\"\n").unwrap();
    env::set_var(CONFIG_ENV_VAR, &path);

    let toml = TomlConfig::discover(None).unwrap();
    assert_eq!(toml.host.as_deref(), Some("env.example"));

    env::remove_var(CONFIG_ENV_VAR);
}
