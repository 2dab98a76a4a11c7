//! Essentia extractor invocation
//!
//! Runs the streaming music extractor as a subprocess:
//! `<extractor> <input-audio> <output-json> <profile>`
//!
//! The exit code is the whole interface: see [`crate::types::ExitClass`].

use crate::types::{ExtractionResult, FeatureExtractor};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Extractor subprocess runner
pub struct EssentiaExtractor {
    binary_path: PathBuf,
    profile_path: PathBuf,
}

impl EssentiaExtractor {
    pub fn new(binary_path: impl Into<PathBuf>, profile_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            profile_path: profile_path.into(),
        }
    }

    /// Run the extractor on `input`, writing features to `output`
    ///
    /// Blocks (on a blocking-pool thread) until the subprocess exits.
    pub async fn run(&self, input: &Path, output: &Path) -> ExtractionResult {
        tracing::debug!(
            audio_file = %input.display(),
            output_file = %output.display(),
            "Running extractor"
        );

        let result = tokio::task::spawn_blocking({
            let binary = self.binary_path.clone();
            let profile = self.profile_path.clone();
            let audio = input.to_path_buf();
            let output_file = output.to_path_buf();

            move || {
                Command::new(&binary)
                    .arg(&audio)
                    .arg(&output_file)
                    .arg(&profile)
                    .output()
            }
        })
        .await;

        let extraction = match result {
            Ok(Ok(output)) => from_output(output),
            Ok(Err(e)) => ExtractionResult {
                exit_code: None,
                output: format!(
                    "Failed to execute {}: {}",
                    self.binary_path.display(),
                    e
                ),
            },
            Err(e) => ExtractionResult {
                exit_code: None,
                output: format!("Extractor task join error: {}", e),
            },
        };

        tracing::debug!(
            audio_file = %input.display(),
            exit_code = ?extraction.exit_code,
            "Extractor finished"
        );

        extraction
    }
}

#[async_trait]
impl FeatureExtractor for EssentiaExtractor {
    async fn extract(&self, input: &Path, output: &Path) -> ExtractionResult {
        self.run(input, output).await
    }
}

/// Combine stdout and stderr (in that order) into one text
fn from_output(output: Output) -> ExtractionResult {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    ExtractionResult {
        exit_code: output.status.code(),
        output: text,
    }
}
