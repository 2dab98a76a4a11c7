//! Drives the processor over the paths given on the command line

use crate::error::ProcessError;
use crate::models::RunSummary;
use crate::services::{FileProcessor, FileScanner, Progress};
use std::io::Write;
use std::path::Path;

/// Sequential run over files and directory trees
pub struct BatchRunner<W: Write> {
    processor: FileProcessor,
    scanner: FileScanner,
    progress: Progress<W>,
    summary: RunSummary,
}

impl<W: Write> BatchRunner<W> {
    pub fn new(processor: FileProcessor, scanner: FileScanner, progress: Progress<W>) -> Self {
        Self {
            processor,
            scanner,
            progress,
            summary: RunSummary::default(),
        }
    }

    /// Process a file, or every matching file under a directory
    ///
    /// `path` must be absolute and must exist.
    pub async fn process_path(&mut self, path: &Path) -> Result<(), ProcessError> {
        if path.is_dir() {
            self.process_directory(path).await
        } else {
            self.process_file(path).await
        }
    }

    async fn process_directory(&mut self, dir: &Path) -> Result<(), ProcessError> {
        self.progress.start(&format!("processing {}", dir.display()));

        let Self {
            processor,
            scanner,
            progress,
            summary,
        } = self;

        for file in scanner.walk(dir)? {
            run_one(processor, progress, summary, &file).await?;
        }
        Ok(())
    }

    async fn process_file(&mut self, path: &Path) -> Result<(), ProcessError> {
        run_one(&self.processor, &mut self.progress, &mut self.summary, path).await
    }

    /// End the run, returning the tally
    pub fn finish(mut self) -> RunSummary {
        self.progress.finish();
        self.summary.log();
        self.summary
    }
}

async fn run_one<W: Write>(
    processor: &FileProcessor,
    progress: &mut Progress<W>,
    summary: &mut RunSummary,
    path: &Path,
) -> Result<(), ProcessError> {
    let display = path.display().to_string();
    progress.start(&display);

    let result = processor.process_file(path).await?;

    progress.report(&display, &result);
    summary.record(&result);
    Ok(())
}
