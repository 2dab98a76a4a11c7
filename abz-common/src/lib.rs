//! # abz Common Library
//!
//! Shared code for the abz submission client:
//! - Error and result types
//! - Configuration loading (TOML, environment, compiled defaults)
//! - UUID helpers for recording identifiers

pub mod config;
pub mod error;
pub mod uuid_utils;

pub use config::{ClientConfig, ConfigOverrides, LoggingConfig, TomlConfig};
pub use error::{Error, Result};
