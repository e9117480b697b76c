//! File-backed storage.
//!
//! Each slot is `<data_dir>/<key>.json`. Writes go to a sibling temp file
//! that is renamed over the slot, so a crash mid-write leaves the previous
//! contents intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::WaitlistStorage;
use crate::waitlist::error::StorageError;

/// Slots stored as files under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for slot files. The directory is created on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_owned(),
        source,
    }
}

#[async_trait]
impl WaitlistStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(key, e))?;
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| io_error(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_error(key, e))?;

        debug!(path = %path.display(), bytes = value.len(), "Storage slot written");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_slot_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.read("deadw3_waitlist").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_creates_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/data"));

        storage.write("deadw3_waitlist", "[\"a@b.com\"]").await.unwrap();
        storage.write("deadw3_waitlist", "[]").await.unwrap();

        assert_eq!(
            storage.read("deadw3_waitlist").await.unwrap().as_deref(),
            Some("[]")
        );
        assert!(storage.dir().join("deadw3_waitlist.json").exists());
        assert!(!storage.dir().join("deadw3_waitlist.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        for key in ["", "../escape", "a/b", "a.b"] {
            assert!(matches!(
                storage.write(key, "x").await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_unreadable_slot_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the slot file should be cannot be read as a string.
        std::fs::create_dir(dir.path().join("deadw3_waitlist.json")).unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.read("deadw3_waitlist").await,
            Err(StorageError::Io { .. })
        ));
    }
}
