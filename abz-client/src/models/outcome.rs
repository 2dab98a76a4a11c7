//! Persisted per-file outcomes
//!
//! The status log stores one short tag per record. A NULL tag comes from
//! older clients and means "submitted".

use std::fmt;

/// Tag written to the status log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Submitted successfully
    Done,
    /// Submission could not reach the host; retried on the next run
    Offline,
    /// Extractor found no recording identifier in the file's tags
    NoMbid,
    /// Extractor failed on the file
    Extractor,
    /// Extractor output was not valid JSON
    Json,
    /// Service answered the submission with an error status
    Rejected,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Done => "done",
            Reason::Offline => "offline",
            Reason::NoMbid => "nombid",
            Reason::Extractor => "extractor",
            Reason::Json => "json",
            Reason::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a path is permanently skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    NoMbid,
    Extractor,
    Json,
    Rejected,
    /// Tag not known to this client (written by another version)
    Unrecognized(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoMbid => f.write_str("nombid"),
            FailureReason::Extractor => f.write_str("extractor"),
            FailureReason::Json => f.write_str("json"),
            FailureReason::Rejected => f.write_str("rejected"),
            FailureReason::Unrecognized(tag) => f.write_str(tag),
        }
    }
}

/// Current state of a path according to the status log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No record exists
    Unprocessed,
    Done,
    Offline,
    Failed(FailureReason),
}

impl Outcome {
    /// Interpret a stored tag
    pub fn from_stored(tag: Option<&str>) -> Self {
        match tag {
            None | Some("done") => Outcome::Done,
            Some("offline") => Outcome::Offline,
            Some("nombid") => Outcome::Failed(FailureReason::NoMbid),
            Some("extractor") => Outcome::Failed(FailureReason::Extractor),
            Some("json") => Outcome::Failed(FailureReason::Json),
            Some("rejected") => Outcome::Failed(FailureReason::Rejected),
            Some(other) => Outcome::Failed(FailureReason::Unrecognized(other.to_string())),
        }
    }
}

impl From<Reason> for Outcome {
    fn from(reason: Reason) -> Self {
        Outcome::from_stored(Some(reason.as_str()))
    }
}
