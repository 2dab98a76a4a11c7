//! On-disk cache of extracted, not-yet-submitted feature payloads
//!
//! Entries are keyed by the SHA-256 of the absolute file path's raw bytes,
//! not of the file content: an audio file edited in place keeps its stale entry until
//! the entry is resolved.

use crate::error::CacheError;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory of `<key>.json` payload files
pub struct FeatureCache {
    dir: PathBuf,
}

impl FeatureCache {
    /// Open the cache, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| CacheError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Deterministic cache key for an audio file path
    pub fn key_for(path: &Path) -> String {
        let hash = Sha256::digest(path.as_os_str().as_encoded_bytes());
        format!("{:x}", hash)
    }

    /// Location of the cache entry for `path`
    pub fn entry_path(&self, path: &Path) -> PathBuf {
        self.dir.join(format!("{}.json", Self::key_for(path)))
    }

    /// Where the extractor writes its output for `path`
    ///
    /// Kept apart from the entry so an interrupted extraction never looks
    /// like a cached payload.
    pub fn scratch_path(&self, path: &Path) -> PathBuf {
        self.dir.join(format!("{}.partial.json", Self::key_for(path)))
    }

    /// Store `payload` for `path`, replacing any existing entry
    pub fn put(&self, path: &Path, payload: &str) -> Result<(), CacheError> {
        let entry = self.entry_path(path);
        let staging = self.dir.join(format!("{}.json.tmp", Self::key_for(path)));

        std::fs::write(&staging, payload).map_err(|source| CacheError::Io {
            path: staging.clone(),
            source,
        })?;
        std::fs::rename(&staging, &entry).map_err(|source| CacheError::Io {
            path: entry.clone(),
            source,
        })?;

        tracing::debug!(file = %path.display(), entry = %entry.display(), "Payload cached");
        Ok(())
    }

    /// Cached payload for `path`, if any
    pub fn get(&self, path: &Path) -> Result<Option<String>, CacheError> {
        let entry = self.entry_path(path);
        match std::fs::read_to_string(&entry) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Io {
                path: entry,
                source,
            }),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entry_path(path).is_file()
    }

    /// Remove the entry for `path`; absent entries are fine
    pub fn delete(&self, path: &Path) -> Result<(), CacheError> {
        remove_if_present(&self.entry_path(path))
    }

    /// Remove the extractor scratch output for `path`; absent files are fine
    pub fn remove_scratch(&self, path: &Path) -> Result<(), CacheError> {
        remove_if_present(&self.scratch_path(path))
    }
}

fn remove_if_present(file: &Path) -> Result<(), CacheError> {
    match std::fs::remove_file(file) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CacheError::Io {
            path: file.to_path_buf(),
            source,
        }),
    }
}
