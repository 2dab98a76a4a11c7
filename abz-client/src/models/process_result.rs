//! Result of running one file through the processor

use crate::models::FailureReason;

/// What happened to one file during this run
///
/// Variants carrying `output`/`body` hold the failure detail that is printed
/// in full for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// Already submitted in an earlier run
    AlreadyDone,
    /// Permanently failed in an earlier run
    AlreadyFailed(FailureReason),
    /// Submitted now
    Submitted { recording_id: String },
    /// Host unreachable; payload kept in the cache
    Offline { detail: String },
    /// Service refused the payload
    Rejected { status: u16, body: String },
    /// Extractor exit code 2
    NoMbid { output: String },
    /// Extractor exit code 1
    ExtractorFailed { output: String },
    /// Any other extractor exit; nothing persisted
    UnknownExit { code: Option<i32>, output: String },
    /// Extractor output was not valid JSON
    BadJson,
    /// No candidate identifier is a valid UUID; nothing persisted
    BadMbid,
}

impl ProcessResult {
    /// Short status shown in the progress column
    pub fn status_label(&self) -> String {
        match self {
            ProcessResult::AlreadyDone => ":) done".to_string(),
            ProcessResult::AlreadyFailed(reason) => format!(":( {}", reason),
            ProcessResult::Submitted { .. } => ":)".to_string(),
            ProcessResult::Offline { .. } => ":| offline".to_string(),
            ProcessResult::Rejected { status, .. } => format!(":( rej {}", status),
            ProcessResult::NoMbid { .. } => ":( nombid".to_string(),
            ProcessResult::ExtractorFailed { .. } => ":( extract".to_string(),
            ProcessResult::UnknownExit { code: Some(code), .. } => format!(":( unk {}", code),
            ProcessResult::UnknownExit { code: None, .. } => ":( unk sig".to_string(),
            ProcessResult::BadJson => ":( json".to_string(),
            ProcessResult::BadMbid => ":( badmbid".to_string(),
        }
    }

    /// Green for success and retryable states, red otherwise
    pub fn is_good(&self) -> bool {
        matches!(
            self,
            ProcessResult::AlreadyDone
                | ProcessResult::Submitted { .. }
                | ProcessResult::Offline { .. }
        )
    }

    /// Detail text to print below the status line, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ProcessResult::Rejected { body, .. } => Some(body),
            ProcessResult::NoMbid { output }
            | ProcessResult::ExtractorFailed { output }
            | ProcessResult::UnknownExit { output, .. } => Some(output),
            _ => None,
        }
    }
}
