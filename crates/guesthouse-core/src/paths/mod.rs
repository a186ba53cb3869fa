//! Filesystem path resolution for application data.
//!
//! The database lives under the platform data directory by default and can
//! be overridden with the `GUESTHOUSE_DB` environment variable, which is
//! what deployments and local development use.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable overriding the database file path.
pub const DB_PATH_ENV: &str = "GUESTHOUSE_DB";

/// Errors from path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("could not determine the platform data directory")]
    NoDataDir,

    #[error("failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Root directory for application data (`<platform data dir>/guesthouse`).
pub fn data_root() -> Result<PathBuf, PathError> {
    let base = dirs::data_dir().ok_or(PathError::NoDataDir)?;
    Ok(base.join("guesthouse"))
}

/// Path to the `SQLite` database file.
///
/// Honors `GUESTHOUSE_DB` when set; otherwise resolves to
/// `<data root>/data/guesthouse.db`, creating the parent directory.
pub fn database_path() -> Result<PathBuf, PathError> {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    let data_dir = data_root()?.join("data");
    fs::create_dir_all(&data_dir).map_err(|e| PathError::CreateFailed {
        path: data_dir.clone(),
        reason: e.to_string(),
    })?;

    Ok(data_dir.join("guesthouse.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_ends_with_db_file() {
        // The env override test would race other tests mutating the
        // environment, so only the default resolution is covered here.
        if std::env::var(DB_PATH_ENV).is_err() {
            let path = database_path().unwrap();
            assert!(path.to_string_lossy().ends_with("guesthouse.db"));
        }
    }
}
