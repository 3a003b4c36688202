use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::KeyValueStore;
use crate::error::StorageError;

/// Directory-backed key-value store.
///
/// Each key maps to `<dir>/<hex(key)>.json`. Keys are hex encoded because
/// record keys like `@GoMarketplace:products` contain characters that are not
/// valid in file names on every platform.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the record files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", hex::encode(key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);

        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(
                format!("reading record file {}", path.display()),
                e,
            )),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            StorageError::io(format!("creating storage dir {}", self.dir.display()), e)
        })?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        // Flushed to disk before the rename, otherwise a crash can leave an empty record
        let write_err =
            |e: std::io::Error| StorageError::io(format!("writing record file {}", tmp.display()), e);
        let mut file = fs::File::create(&tmp).await.map_err(write_err)?;
        file.write_all(value.as_bytes()).await.map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        drop(file);

        fs::rename(&tmp, &path).await.map_err(|e| {
            StorageError::io(format!("replacing record file {}", path.display()), e)
        })?;

        debug!(path = %path.display(), "Wrote record");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        assert!(store.get_item("@GoMarketplace:products").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("nested"));

        store.set_item("k", "[1,2]".to_string()).await.unwrap();
        store.set_item("k", "[3]".to_string()).await.unwrap();

        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("[3]"));
    }

    #[tokio::test]
    async fn test_shorter_value_replaces_longer() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        store.set_item("k", "[1,2,3,4,5,6,7,8]".to_string()).await.unwrap();
        store.set_item("k", "[]".to_string()).await.unwrap();

        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("[]"));
        let on_disk = std::fs::read_to_string(store.path_for("k")).unwrap();
        assert_eq!(on_disk, "[]");
    }

    #[tokio::test]
    async fn test_key_is_hex_encoded_in_file_name() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        let path = store.path_for("a:b");
        assert_eq!(path.file_name().unwrap(), "613a62.json");
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        store.set_item("k", "{}".to_string()).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("6b.json")]);
    }

    #[tokio::test]
    async fn test_unreadable_path_is_io_error() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        // A directory where the record file should be cannot be read as a string
        std::fs::create_dir(store.path_for("k")).unwrap();

        let err = store.get_item("k").await.unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
