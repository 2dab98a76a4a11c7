//! Data models for the submission client

pub mod outcome;
pub mod process_result;
pub mod run_summary;

pub use outcome::{FailureReason, Outcome, Reason};
pub use process_result::ProcessResult;
pub use run_summary::RunSummary;
