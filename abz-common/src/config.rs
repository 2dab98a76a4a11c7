//! Configuration loading for the submission client
//!
//! Every setting resolves with the same priority order:
//! 1. Command-line argument / environment variable (handled by the CLI layer)
//! 2. TOML config file
//! 3. Compiled default
//!
//! The result is an immutable [`ClientConfig`] built once at startup and
//! passed explicitly to every component that needs it.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ABZ_CONFIG";

/// Essentia extractor binary looked up in PATH when nothing is configured
pub const DEFAULT_EXTRACTOR: &str = "streaming_extractor_music";

/// Default submission host
pub const DEFAULT_HOST: &str = "acousticbrainz.org";

/// Default HTTP timeout for one submission
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File extensions accepted by the directory walk when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "mp3", "mp2", "m2a", "ogg", "oga", "flac", "mp4", "m4a", "m4r", "m4b", "m4p", "aac", "wma",
    "asf", "mpc", "wv", "spx", "tta", "3g2", "aif", "aiff", "ape",
];

/// Configuration as read from the TOML file
///
/// All fields are optional; anything missing falls back to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Path (or bare name in PATH) of the extractor binary
    #[serde(default)]
    pub extractor_path: Option<PathBuf>,

    /// Extractor profile file; a temporary one is generated when absent
    #[serde(default)]
    pub profile_file: Option<PathBuf>,

    /// Submission host, optionally with `:port`
    #[serde(default)]
    pub host: Option<String>,

    /// Directory holding cached feature payloads
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// SQLite file holding the status log
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Accepted file extensions (case-insensitive, leading dot optional)
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// HTTP timeout for one submission, in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load the config file if one applies
    ///
    /// An explicit path (CLI, then `ABZ_CONFIG`) must exist. The per-user
    /// default location is only read when present; a missing default file
    /// yields an empty config.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Self::load(Path::new(&path));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Values supplied on the command line (or through their env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub extractor_path: Option<PathBuf>,
    pub profile_file: Option<PathBuf>,
    pub host: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
}

/// Immutable configuration for one run
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub extractor_path: PathBuf,
    pub profile_file: Option<PathBuf>,
    pub host: String,
    pub cache_dir: PathBuf,
    pub database_path: PathBuf,
    /// Normalized: lowercase, no leading dot
    pub extensions: Vec<String>,
    pub timeout: Duration,
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Merge overrides, file config and compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Result<Self> {
        let host = overrides
            .host
            .or(file.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = validate_host(host)?;

        let extensions: Vec<String> = match file.extensions {
            Some(list) => list.iter().map(|e| normalize_extension(e)).collect(),
            None => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        };
        let extensions: Vec<String> = extensions.into_iter().filter(|e| !e.is_empty()).collect();
        if extensions.is_empty() {
            return Err(Error::Config("extensions list is empty".to_string()));
        }

        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".to_string()));
        }

        Ok(Self {
            extractor_path: overrides
                .extractor_path
                .or(file.extractor_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXTRACTOR)),
            profile_file: overrides.profile_file.or(file.profile_file),
            host,
            cache_dir: overrides
                .cache_dir
                .or(file.cache_dir)
                .unwrap_or_else(default_cache_dir),
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or_else(default_database_path),
            extensions,
            timeout: Duration::from_secs(timeout_secs),
            logging: file.logging,
        })
    }
}

fn validate_host(host: String) -> Result<String> {
    let host = host.trim().trim_end_matches('/').to_string();
    if host.is_empty() {
        return Err(Error::Config("host must not be empty".to_string()));
    }
    if host.contains("://") {
        return Err(Error::Config(format!(
            "host must not include a scheme: {}",
            host
        )));
    }
    Ok(host)
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Per-user config file location (`~/.config/abz/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("abz").join("config.toml"))
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("abz"))
        .unwrap_or_else(|| PathBuf::from("./abz_cache"))
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("abz").join("filelog.db"))
        .unwrap_or_else(|| PathBuf::from("./abz_data/filelog.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".FLAC"), "flac");
        assert_eq!(normalize_extension(" mp3 "), "mp3");
    }

    #[test]
    fn test_validate_host() {
        assert_eq!(validate_host("example.org/".to_string()).unwrap(), "example.org");
        assert!(validate_host("  ".to_string()).is_err());
        assert!(validate_host("http://example.org".to_string()).is_err());
    }
}
