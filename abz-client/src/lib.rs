//! abz-client library interface
//!
//! Batch client that extracts acoustic features from local audio files with
//! the Essentia extractor and submits them to an AcousticBrainz server.
//! Exposes its components for the `abzsubmit` binary and integration tests.

pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod targets;
pub mod types;

pub use crate::error::{CacheError, ProcessError, TargetError};
