//! Mock archive storage

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uniicon_storage::{Storage, StorageBackend, StorageError, StorageResult};

/// One recorded `put_object` call
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub key: String,
    pub content_type: String,
    pub metadata: BTreeMap<String, String>,
    pub size: usize,
}

/// In-memory storage that records uploads, or fails every upload
pub struct MockStorage {
    fail: bool,
    attempts: AtomicUsize,
    uploads: Mutex<Vec<RecordedUpload>>,
}

impl MockStorage {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            attempts: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::succeeding()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        metadata: &BTreeMap<String, String>,
    ) -> StorageResult<String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StorageError::UploadFailed("simulated outage".to_string()));
        }

        self.uploads.lock().unwrap().push(RecordedUpload {
            key: key.to_string(),
            content_type: content_type.to_string(),
            metadata: metadata.clone(),
            size: data.len(),
        });
        Ok(format!("https://test-bucket.example.com/{}", key))
    }

    fn bucket(&self) -> &str {
        "test-bucket"
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
