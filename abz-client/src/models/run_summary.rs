//! Per-run outcome tally

use crate::models::ProcessResult;
use tracing::info;

/// Counts of each outcome seen during one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub submitted: usize,
    /// Skipped because of an earlier terminal outcome
    pub skipped: usize,
    pub offline: usize,
    pub rejected: usize,
    pub nombid: usize,
    pub extractor: usize,
    pub json: usize,
    pub badmbid: usize,
    pub unknown: usize,
}

impl RunSummary {
    pub fn record(&mut self, result: &ProcessResult) {
        let counter = match result {
            ProcessResult::AlreadyDone | ProcessResult::AlreadyFailed(_) => &mut self.skipped,
            ProcessResult::Submitted { .. } => &mut self.submitted,
            ProcessResult::Offline { .. } => &mut self.offline,
            ProcessResult::Rejected { .. } => &mut self.rejected,
            ProcessResult::NoMbid { .. } => &mut self.nombid,
            ProcessResult::ExtractorFailed { .. } => &mut self.extractor,
            ProcessResult::BadJson => &mut self.json,
            ProcessResult::BadMbid => &mut self.badmbid,
            ProcessResult::UnknownExit { .. } => &mut self.unknown,
        };
        *counter += 1;
    }

    pub fn total(&self) -> usize {
        self.submitted
            + self.skipped
            + self.offline
            + self.rejected
            + self.nombid
            + self.extractor
            + self.json
            + self.badmbid
            + self.unknown
    }

    pub fn log(&self) {
        info!(
            total = self.total(),
            submitted = self.submitted,
            skipped = self.skipped,
            offline = self.offline,
            rejected = self.rejected,
            nombid = self.nombid,
            extractor = self.extractor,
            json = self.json,
            badmbid = self.badmbid,
            unknown = self.unknown,
            "Run complete"
        );
    }
}
