//! AcousticBrainz submission client
//!
//! Posts a low-level feature document for one recording:
//! `POST http://<host>/<recording-mbid>/low-level`
//!
//! Failing to reach the host and being refused by it are different outcomes:
//! the first is retried on a later run, the second is final.

use crate::types::{FeatureSubmitter, SubmissionError};
use async_trait::async_trait;
use std::time::Duration;

const USER_AGENT: &str = concat!("abz/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the submission endpoint
pub struct SubmissionClient {
    http_client: reqwest::Client,
    host: String,
}

impl SubmissionClient {
    /// Create new submission client for `host` (`name[:port]`)
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            host: host.into(),
        })
    }

    /// Submission URL for a recording
    pub fn endpoint(&self, recording_id: &str) -> String {
        format!("http://{}/{}/low-level", self.host, recording_id)
    }

    /// Post `payload` (feature JSON) for `recording_id`
    pub async fn submit_features(
        &self,
        recording_id: &str,
        payload: &str,
    ) -> Result<(), SubmissionError> {
        let url = self.endpoint(recording_id);

        tracing::debug!(mbid = %recording_id, url = %url, "Submitting features");

        // Any transport-level failure counts as offline
        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(|e| SubmissionError::Offline(e.to_string()))?;

        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(mbid = %recording_id, status = status.as_u16(), "Submission rejected");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(mbid = %recording_id, status = status.as_u16(), "Submission accepted");

        Ok(())
    }
}

#[async_trait]
impl FeatureSubmitter for SubmissionClient {
    async fn submit(&self, recording_id: &str, payload: &str) -> Result<(), SubmissionError> {
        self.submit_features(recording_id, payload).await
    }
}
