//! Error types for abz-client
//!
//! Only storage failures are fatal for a run; everything else a file can hit
//! is classified into a [`crate::models::ProcessResult`].

use std::path::PathBuf;
use thiserror::Error;

/// Feature cache I/O failure
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Command-line target that cannot be processed
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("Failed to resolve {}: {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal error while processing a file
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Status log could not be read or written
    #[error("Status store error: {0}")]
    Store(#[from] abz_common::Error),

    /// Feature cache could not be read or written
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Directory walk could not start
    #[error(transparent)]
    Scan(#[from] crate::services::ScanError),
}
