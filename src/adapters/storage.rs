use crate::domain::ports::Storage;
use crate::utils::error::{InitError, Result};
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at the template directory.
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

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        tracing::debug!("Reading {}", full_path.display());

        tokio::fs::read(&full_path)
            .await
            .map_err(|source| InitError::ReadError {
                path: full_path,
                source,
            })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);
        tracing::debug!("Writing {} ({} bytes)", full_path.display(), data.len());

        tokio::fs::write(&full_path, data)
            .await
            .map_err(|source| InitError::WriteError {
                path: full_path,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_and_write_relative_to_base() {
        let temp_dir = TempDir::new().unwrap();
        tokio::fs::create_dir(temp_dir.path().join("k3s")).await.unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage
            .write_file("k3s/0_namespace.yml", b"name: my-app\n")
            .await
            .unwrap();

        let data = storage.read_file("k3s/0_namespace.yml").await.unwrap();
        assert_eq!(data, b"name: my-app\n");
        assert!(temp_dir.path().join("k3s/0_namespace.yml").exists());
    }

    #[tokio::test]
    async fn test_missing_file_reports_full_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage.read_file("README.md").await.unwrap_err();

        match err {
            InitError::ReadError { path, source } => {
                assert_eq!(path, temp_dir.path().join("README.md"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_write_does_not_create_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let result = storage.write_file("k3s/1_deployment.yml", b"x").await;

        tokio_test::assert_err!(result);
    }
}
