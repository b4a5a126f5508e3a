use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
    root_name: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for archived icons (e.g., "/var/lib/uniicon")
    /// * `base_url` - Base URL the directory is served from (e.g., "http://localhost:3000/assets")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let root_name = base_path.display().to_string();

        Ok(LocalStorage {
            base_path,
            base_url,
            root_name,
        })
    }

    /// Convert storage key to filesystem path, rejecting keys that escape the root
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty() || storage_key.contains("..") || storage_key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &BTreeMap<String, String>,
    ) -> StorageResult<String> {
        let path = self.key_to_path(key)?;
        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        tracing::debug!(
            key = %key,
            content_type = %content_type,
            metadata_fields = metadata.len(),
            size_bytes = data.len(),
            "Stored icon on local filesystem"
        );

        Ok(self.generate_url(key))
    }

    fn bucket(&self) -> &str {
        &self.root_name
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_object_writes_file_and_returns_url() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:3000/assets/".to_string())
            .await
            .unwrap();

        let url = storage
            .put_object(
                "images/star_2024.png",
                Bytes::from_static(b"\x89PNG"),
                "image/png",
                &BTreeMap::new(),
            )
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/assets/images/star_2024.png");
        let written = std::fs::read(dir.path().join("images/star_2024.png")).unwrap();
        assert_eq!(written, b"\x89PNG");
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }

    #[tokio::test]
    async fn test_rejects_traversal_keys() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost".to_string())
            .await
            .unwrap();

        let result = storage
            .put_object(
                "../escape.png",
                Bytes::from_static(b"x"),
                "image/png",
                &BTreeMap::new(),
            )
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
