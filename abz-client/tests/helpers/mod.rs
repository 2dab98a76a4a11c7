//! Test helpers for abz-client integration tests
//!
//! - `MockExtractor` / `MockSubmitter`: in-process stand-ins that count calls
//! - `Harness`: a processor over a temporary database and cache that can be
//!   "restarted" to simulate a later run
//! - `spawn_service`: a local HTTP server playing the submission endpoint

#![allow(dead_code)]

use abz_client::db::{init_database_pool, StatusStore};
use abz_client::services::{FeatureCache, FileProcessor};
use abz_client::types::{ExtractionResult, FeatureExtractor, FeatureSubmitter, SubmissionError};
use async_trait::async_trait;
use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const VALID_MBID: &str = "3f1f3a9e-5d2b-4c6a-9b1e-0a2b3c4d5e6f";
pub const OTHER_MBID: &str = "8c1e2f3a-4b5c-4d6e-8f70-112233445566";

/// Feature document with the given `musicbrainz_trackid` value
pub fn payload(track_ids: Value) -> String {
    json!({
        "metadata": {
            "tags": {"musicbrainz_trackid": track_ids},
            "version": {"essentia": "2.1-beta2"}
        },
        "lowlevel": {"average_loudness": 0.81},
        "rhythm": {"bpm": 120.0}
    })
    .to_string()
}

/// Extractor stand-in: exits with a fixed code, optionally writing output
pub struct MockExtractor {
    exit_code: Mutex<Option<i32>>,
    output: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl MockExtractor {
    /// Exit 0 after writing `output` to the output path
    pub fn succeeding(output: impl Into<String>) -> Self {
        Self {
            exit_code: Mutex::new(Some(0)),
            output: Mutex::new(Some(output.into())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Exit with `code` without writing anything
    pub fn exiting(code: Option<i32>) -> Self {
        Self {
            exit_code: Mutex::new(code),
            output: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_behaviour(&self, code: Option<i32>, output: Option<String>) {
        *self.exit_code.lock().unwrap() = code;
        *self.output.lock().unwrap() = output;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeatureExtractor for MockExtractor {
    async fn extract(&self, _input: &Path, output: &Path) -> ExtractionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let exit_code = *self.exit_code.lock().unwrap();
        let text = self.output.lock().unwrap().clone();
        if let Some(text) = text {
            std::fs::write(output, text).unwrap();
        }
        ExtractionResult {
            exit_code,
            output: "mock extractor output".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Accept,
    Offline,
    Reject(u16),
}

/// Submission stand-in recording every attempt
pub struct MockSubmitter {
    mode: Mutex<SubmitMode>,
    attempts: Mutex<Vec<(String, String)>>,
}

impl MockSubmitter {
    pub fn new(mode: SubmitMode) -> Self {
        Self {
            mode: Mutex::new(mode),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn set_mode(&self, mode: SubmitMode) {
        *self.mode.lock().unwrap() = mode;
    }

    /// (recording id, payload) for every attempt, in order
    pub fn attempts(&self) -> Vec<(String, String)> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeatureSubmitter for MockSubmitter {
    async fn submit(&self, recording_id: &str, payload: &str) -> Result<(), SubmissionError> {
        self.attempts
            .lock()
            .unwrap()
            .push((recording_id.to_string(), payload.to_string()));
        match *self.mode.lock().unwrap() {
            SubmitMode::Accept => Ok(()),
            SubmitMode::Offline => Err(SubmissionError::Offline("connection refused".to_string())),
            SubmitMode::Reject(status) => Err(SubmissionError::Rejected {
                status,
                body: "rejected by test".to_string(),
            }),
        }
    }
}

/// Processor over a temporary database and cache directory
pub struct Harness {
    pub dir: TempDir,
    pub extractor: Arc<MockExtractor>,
    pub submitter: Arc<MockSubmitter>,
    pub processor: FileProcessor,
}

impl Harness {
    pub async fn new(extractor: MockExtractor, mode: SubmitMode) -> Self {
        let dir = TempDir::new().unwrap();
        let extractor = Arc::new(extractor);
        let submitter = Arc::new(MockSubmitter::new(mode));
        let processor = build_processor(dir.path(), extractor.clone(), submitter.clone()).await;
        Self {
            dir,
            extractor,
            submitter,
            processor,
        }
    }

    /// Start a fresh run: new store loaded from disk, same mocks
    pub async fn restart(&mut self) {
        self.processor =
            build_processor(self.dir.path(), self.extractor.clone(), self.submitter.clone()).await;
    }

    /// Absolute path of a (not necessarily existing) audio file
    pub fn audio(&self, name: &str) -> PathBuf {
        self.dir.path().join("music").join(name)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.dir.path().join("cache")
    }
}

async fn build_processor(
    root: &Path,
    extractor: Arc<MockExtractor>,
    submitter: Arc<MockSubmitter>,
) -> FileProcessor {
    let pool = init_database_pool(&root.join("filelog.db")).await.unwrap();
    let store = StatusStore::open(pool).await.unwrap();
    let cache = FeatureCache::open(root.join("cache")).unwrap();
    FileProcessor::new(store, cache, extractor, submitter)
}

/// Submissions received by the local service
pub type Received = Arc<Mutex<Vec<(String, String)>>>;

/// Serve `POST /:mbid/low-level` on 127.0.0.1, answering with `status`
pub async fn spawn_service(status: StatusCode) -> (SocketAddr, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    async fn handler(
        State((status, received)): State<(StatusCode, Received)>,
        UrlPath(mbid): UrlPath<String>,
        body: String,
    ) -> StatusCode {
        received.lock().unwrap().push((mbid, body));
        status
    }

    let app = Router::new()
        .route("/:mbid/low-level", post(handler))
        .with_state((status, received.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, received)
}

/// An address nothing is listening on
pub fn unreachable_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
