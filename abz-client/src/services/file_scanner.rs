//! Audio file discovery
//!
//! Recursive walk under a root, keeping files whose extension is in the
//! configured allowlist. Files come out in traversal order, unsorted.
//! Symlinked directories are not descended into; symlinked files are kept.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Audio file scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Audio file scanner
pub struct FileScanner {
    /// Lowercase, no leading dot
    extensions: Vec<String>,
}

impl FileScanner {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Lazily walk `root`, yielding matching files
    ///
    /// Unreadable entries are logged and skipped.
    pub fn walk<'a>(
        &'a self,
        root: &Path,
    ) -> Result<impl Iterator<Item = PathBuf> + 'a, ScanError> {
        if !root.exists() {
            return Err(ScanError::PathNotFound(root.to_path_buf()));
        }

        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let walker = WalkDir::new(root).follow_links(false).into_iter();

        Ok(walker.filter_map(move |entry| match entry {
            Ok(entry) if self.is_candidate(&entry) => Some(entry.into_path()),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Error accessing entry: {}", e);
                None
            }
        }))
    }

    /// Collect all matching files under `root`
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        Ok(self.walk(root)?.collect())
    }

    fn is_candidate(&self, entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        is_file && self.has_accepted_extension(entry.path())
    }

    /// Case-insensitive extension check
    pub fn has_accepted_extension(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }
}
