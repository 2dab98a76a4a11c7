//! Extractor profile file
//!
//! The extractor takes a profile path as its third argument. A configured
//! profile is used as-is; otherwise a minimal one is written to a temporary
//! file that lives exactly as long as this value.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Profile generated when none is configured
pub const DEFAULT_PROFILE: &str = "requireMbid: true\nindent: 0\n";

pub enum ExtractorProfile {
    Configured(PathBuf),
    Generated(NamedTempFile),
}

impl ExtractorProfile {
    /// Use `configured` if given, else generate the default profile
    pub fn prepare(configured: Option<&Path>) -> std::io::Result<Self> {
        match configured {
            Some(path) => {
                if !path.is_file() {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("profile file not found: {}", path.display()),
                    ));
                }
                Ok(ExtractorProfile::Configured(path.to_path_buf()))
            }
            None => {
                let mut file = tempfile::Builder::new()
                    .prefix("abz-profile-")
                    .suffix(".yaml")
                    .tempfile()?;
                file.write_all(DEFAULT_PROFILE.as_bytes())?;
                file.flush()?;
                tracing::debug!(profile = %file.path().display(), "Generated extractor profile");
                Ok(ExtractorProfile::Generated(file))
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ExtractorProfile::Configured(path) => path,
            ExtractorProfile::Generated(file) => file.path(),
        }
    }
}
