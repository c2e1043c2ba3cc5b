//! Data directory resolution.
//!
//! Resolution order:
//! 1. `FEEDQ_DATA_DIR` environment variable
//! 2. The platform's local data directory joined with `feedq`

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FEEDQ_DATA_DIR";

#[derive(Debug, Error)]
pub enum PathError {
    /// No env override and the platform has no local data directory.
    #[error("No data directory: set FEEDQ_DATA_DIR")]
    NoDataDir,

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("Cannot create {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Root directory for feedq data, created if missing.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var_os(DATA_DIR_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("feedq"),
    };

    ensure_directory(&root)?;
    Ok(root)
}

/// Directory holding persisted queue snapshots.
pub fn snapshot_dir() -> Result<PathBuf, PathError> {
    let dir = data_root()?.join("snapshots");
    ensure_directory(&dir)?;
    Ok(dir)
}

/// Create `path` (and parents) if missing; fail if it exists as a file.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PathError::NotADirectory(path.to_path_buf())),
        Err(_) => fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_directory_creates_nested() {
        let base = env::temp_dir().join(format!("feedq-paths-{}", std::process::id()));
        let nested = base.join("a").join("b");

        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        ensure_directory(&nested).unwrap();

        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_ensure_directory_rejects_file() {
        let file = env::temp_dir().join(format!("feedq-paths-file-{}", std::process::id()));
        fs::write(&file, b"x").unwrap();

        let result = ensure_directory(&file);
        assert!(matches!(result, Err(PathError::NotADirectory(_))));

        fs::remove_file(&file).unwrap();
    }
}
