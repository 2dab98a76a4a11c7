//! Per-file processing state machine
//!
//! Each file starts from its status-log state:
//!
//! | Logged state            | Action                                   |
//! |-------------------------|------------------------------------------|
//! | done / legacy           | skip                                     |
//! | failed (any reason)     | skip                                     |
//! | offline                 | resubmit the cached payload              |
//! | unprocessed, cached     | submit the cached payload                |
//! | unprocessed, not cached | extract, validate, submit                |
//!
//! An offline path whose cache entry has gone missing is extracted again.
//!
//! Only storage failures escape as errors; every other problem is recorded
//! (or deliberately not recorded) and returned as a [`ProcessResult`].

use crate::db::StatusStore;
use crate::error::ProcessError;
use crate::models::{Outcome, ProcessResult, Reason};
use crate::services::payload_validator;
use crate::services::FeatureCache;
use crate::types::{ExitClass, FeatureExtractor, FeatureSubmitter, SubmissionError};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs one file at a time through status lookup, extraction and submission
pub struct FileProcessor {
    store: StatusStore,
    cache: FeatureCache,
    extractor: Arc<dyn FeatureExtractor>,
    submitter: Arc<dyn FeatureSubmitter>,
}

impl FileProcessor {
    pub fn new(
        store: StatusStore,
        cache: FeatureCache,
        extractor: Arc<dyn FeatureExtractor>,
        submitter: Arc<dyn FeatureSubmitter>,
    ) -> Self {
        Self {
            store,
            cache,
            extractor,
            submitter,
        }
    }

    /// Process one audio file given by absolute path
    pub async fn process_file(&self, path: &Path) -> Result<ProcessResult, ProcessError> {
        match self.store.lookup(path).await {
            Outcome::Done => return Ok(ProcessResult::AlreadyDone),
            Outcome::Failed(reason) => return Ok(ProcessResult::AlreadyFailed(reason)),
            Outcome::Offline | Outcome::Unprocessed => {}
        }

        if let Some(payload) = self.cache.get(path)? {
            match serde_json::from_str::<Value>(&payload) {
                Ok(features) => {
                    debug!(file = %path.display(), "Using cached features");
                    return self.submit_features(path, &payload, &features).await;
                }
                Err(e) => {
                    warn!(file = %path.display(), "Discarding unreadable cache entry: {}", e);
                    self.cache.delete(path)?;
                }
            }
        }

        let result = self.extract_and_submit(path).await;
        self.cache.remove_scratch(path)?;
        result
    }

    async fn extract_and_submit(&self, path: &Path) -> Result<ProcessResult, ProcessError> {
        let scratch = self.cache.scratch_path(path);
        let extraction = self.extractor.extract(path, &scratch).await;

        match extraction.class() {
            ExitClass::NoMbid => {
                self.store.record_outcome(path, Reason::NoMbid).await?;
                Ok(ProcessResult::NoMbid {
                    output: extraction.output,
                })
            }
            ExitClass::ExtractorFailure => {
                self.store.record_outcome(path, Reason::Extractor).await?;
                Ok(ProcessResult::ExtractorFailed {
                    output: extraction.output,
                })
            }
            ExitClass::Unknown(code) => {
                // Not recorded: the next run retries from scratch
                warn!(file = %path.display(), exit_code = ?code, "Extractor exited abnormally");
                Ok(ProcessResult::UnknownExit {
                    code,
                    output: extraction.output,
                })
            }
            ExitClass::Success => {
                let parsed = tokio::fs::read_to_string(&scratch)
                    .await
                    .map_err(|e| e.to_string())
                    .and_then(|payload| {
                        serde_json::from_str::<Value>(&payload)
                            .map(|features| (payload, features))
                            .map_err(|e| e.to_string())
                    });

                match parsed {
                    Ok((payload, features)) => {
                        self.submit_features(path, &payload, &features).await
                    }
                    Err(e) => {
                        warn!(file = %path.display(), "Unreadable extractor output: {}", e);
                        self.store.record_outcome(path, Reason::Json).await?;
                        Ok(ProcessResult::BadJson)
                    }
                }
            }
        }
    }

    async fn submit_features(
        &self,
        path: &Path,
        payload: &str,
        features: &Value,
    ) -> Result<ProcessResult, ProcessError> {
        let Some(recording_id) = payload_validator::select_recording_id(features) else {
            // Not recorded: tags may be fixed before the next run
            self.cache.delete(path)?;
            return Ok(ProcessResult::BadMbid);
        };

        match self.submitter.submit(&recording_id, payload).await {
            Ok(()) => {
                self.store.record_outcome(path, Reason::Done).await?;
                self.cache.delete(path)?;
                info!(file = %path.display(), mbid = %recording_id, "Submitted");
                Ok(ProcessResult::Submitted { recording_id })
            }
            Err(SubmissionError::Offline(detail)) => {
                // Cache first so an offline record always has a payload behind it
                if !self.cache.contains(path) {
                    self.cache.put(path, payload)?;
                }
                self.store.record_outcome(path, Reason::Offline).await?;
                info!(
                    file = %path.display(),
                    error = %detail,
                    "Service unreachable, payload cached"
                );
                Ok(ProcessResult::Offline { detail })
            }
            Err(SubmissionError::Rejected { status, body }) => {
                self.store.record_outcome(path, Reason::Rejected).await?;
                self.cache.delete(path)?;
                Ok(ProcessResult::Rejected { status, body })
            }
        }
    }

    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    pub fn cache(&self) -> &FeatureCache {
        &self.cache
    }
}
