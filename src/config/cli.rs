use crate::core::Storage;
use crate::utils::error::{HarvestError, Result};
use std::path::PathBuf;
use tokio::fs;

/// Snapshot storage on the local file system.
///
/// The base directory must already exist; it is never created here.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn full_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    async fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.full_path(name)).await?;
        Ok(data)
    }

    async fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(name);
        let tmp_path = self.base_path.join(format!(".{}.tmp", name));

        let persistence_error = |source: std::io::Error| HarvestError::PersistenceError {
            path: full_path.clone(),
            source,
        };

        // 先寫暫存檔再 rename，失敗時不留下半份檔案
        if let Err(e) = fs::write(&tmp_path, data).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(persistence_error(e));
        }

        if let Err(e) = fs::rename(&tmp_path, &full_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(persistence_error(e));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("snapshot.json", b"{}").await.unwrap();

        assert_eq!(storage.read_file("snapshot.json").await.unwrap(), b"{}");
        assert!(!dir.path().join(".snapshot.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("snapshot.json", b"first").await.unwrap();
        storage.write_file("snapshot.json", b"second").await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("snapshot.json")).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_missing_directory_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        let storage = LocalStorage::new(&missing);

        let err = storage.write_file("snapshot.json", b"{}").await.unwrap_err();

        match err {
            HarvestError::PersistenceError { path, .. } => {
                assert_eq!(path, missing.join("snapshot.json"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!missing.exists());
    }
}
