//! Services for abz-client
//!
//! Leaf components (cache, extractor, validator, submission client) and the
//! processor and batch runner that compose them.

pub mod batch_runner;
pub mod essentia_extractor;
pub mod extractor_profile;
pub mod feature_cache;
pub mod file_processor;
pub mod file_scanner;
pub mod payload_validator;
pub mod progress;
pub mod submission_client;

pub use batch_runner::BatchRunner;
pub use essentia_extractor::EssentiaExtractor;
pub use extractor_profile::ExtractorProfile;
pub use feature_cache::FeatureCache;
pub use file_processor::FileProcessor;
pub use file_scanner::{FileScanner, ScanError};
pub use progress::Progress;
pub use submission_client::SubmissionClient;
