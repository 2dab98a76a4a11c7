//! Command-line target validation

use crate::error::TargetError;
use std::path::PathBuf;

/// Check every target and make it absolute
///
/// All targets are checked before any is returned, so a run never starts
/// when one of them is missing. The first missing target is reported.
pub fn resolve_targets(paths: &[PathBuf]) -> Result<Vec<PathBuf>, TargetError> {
    if let Some(missing) = paths.iter().find(|path| !path.exists()) {
        return Err(TargetError::Missing(missing.clone()));
    }

    paths
        .iter()
        .map(|path| {
            std::path::absolute(path).map_err(|source| TargetError::Resolve {
                path: path.clone(),
                source,
            })
        })
        .collect()
}
