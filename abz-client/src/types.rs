//! Core types and trait seams
//!
//! The processor talks to the extractor and the submission service through
//! the traits below, so both can be swapped for in-process fakes in tests.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Extractor exit status, classified per the extractor's exit-code contract
///
/// `0` success, `1` extraction failure, `2` no recording identifier in the
/// file's tags, anything else unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitClass {
    Success,
    ExtractorFailure,
    NoMbid,
    /// `None` when the process was killed by a signal or never started
    Unknown(Option<i32>),
}

impl ExitClass {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => ExitClass::Success,
            Some(1) => ExitClass::ExtractorFailure,
            Some(2) => ExitClass::NoMbid,
            other => ExitClass::Unknown(other),
        }
    }
}

/// Outcome of one extractor invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub exit_code: Option<i32>,
    /// Combined stdout and stderr
    pub output: String,
}

impl ExtractionResult {
    pub fn class(&self) -> ExitClass {
        ExitClass::from_code(self.exit_code)
    }
}

/// Runs feature extraction for one audio file
#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    /// Extract features of `input` into the JSON file at `output`
    ///
    /// Never fails: spawn and I/O problems surface as an unclassified exit.
    async fn extract(&self, input: &Path, output: &Path) -> ExtractionResult;
}

/// Submission failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// Host could not be reached (DNS, connect, timeout, reset)
    #[error("Network error: {0}")]
    Offline(String),

    /// Service answered with an error status
    #[error("Submission rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Sends a feature payload for one recording
#[async_trait]
pub trait FeatureSubmitter: Send + Sync {
    async fn submit(&self, recording_id: &str, payload: &str) -> Result<(), SubmissionError>;
}
