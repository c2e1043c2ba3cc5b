//! File-backed snapshot store.
//!
//! Each key maps to one JSON file inside a directory. Writes go to a
//! temporary sibling first and are renamed into place, so a crash mid-write
//! leaves either the old snapshot or the new one, never a torn file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use feedq_core::{SnapshotStorePort, StorageError};

/// Snapshot store keeping one file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the snapshot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Map a storage key to a portable file stem.
///
/// `[A-Za-z0-9._-]` pass through; every other byte becomes `~hh`. The
/// escape is injective, so distinct keys never share a file.
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("~{byte:02x}"));
        }
    }
    stem
}

#[async_trait]
impl SnapshotStorePort for FileSnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e.to_string())),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::Unavailable {
                message: format!("{}: {e}", self.dir.display()),
            })?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| StorageError::io(key, e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::io(key, e.to_string()))?;

        tracing::trace!(target: "feedq.store", key, path = %path.display(), bytes = value.len(), "Snapshot written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_escapes() {
        assert_eq!(file_stem("feedq:queue"), "feedq~3aqueue");
        assert_eq!(file_stem("plain-key_1.v2"), "plain-key_1.v2");
        assert_eq!(file_stem("../etc"), "..~2fetc");
        assert_ne!(file_stem("a:b"), file_stem("a_b"));
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());
        assert_eq!(store.read("feedq:queue").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("nested"));

        store.write("feedq:queue", "[1,2,3]").await.unwrap();
        assert_eq!(
            store.read("feedq:queue").await.unwrap().as_deref(),
            Some("[1,2,3]")
        );
        assert!(store.path_for("feedq:queue").exists());
        assert!(!store.path_for("feedq:queue").with_extension("json.tmp").exists());

        store.write("feedq:queue", "[]").await.unwrap();
        assert_eq!(store.read("feedq:queue").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());

        store.write("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.read("k").await.unwrap(), None);
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_write_into_file_path_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let store = FileSnapshotStore::new(&blocker);
        let err = store.write("k", "v").await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable { .. }));
    }
}
