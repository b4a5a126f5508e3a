//! Best-effort archival of generated icons.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use uniicon_core::{ArchivedAsset, GeneratedImage};
use uniicon_storage::{archive_key, Storage};

/// Value of the `source` metadata field on archived objects
pub const ARCHIVE_SOURCE: &str = "uniicon-ai-generator";

/// Persists icons to object storage when storage is configured.
///
/// Archival never fails a request: an unconfigured backend, an upload error
/// or a timeout all yield `None`.
#[derive(Clone)]
pub struct Archiver {
    storage: Option<Arc<dyn Storage>>,
    timeout: Duration,
}

impl Archiver {
    pub fn new(storage: Option<Arc<dyn Storage>>, timeout: Duration) -> Self {
        Self { storage, timeout }
    }

    pub fn is_configured(&self) -> bool {
        self.storage.is_some()
    }

    pub async fn archive(&self, image: &GeneratedImage, prompt: &str) -> Option<ArchivedAsset> {
        let Some(storage) = &self.storage else {
            tracing::info!("Archive storage not configured, skipping upload");
            return None;
        };

        let now = Utc::now();
        let key = archive_key(prompt, now);

        let mut metadata = BTreeMap::new();
        metadata.insert("prompt".to_string(), prompt.to_string());
        metadata.insert(
            "generated-at".to_string(),
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        metadata.insert("source".to_string(), ARCHIVE_SOURCE.to_string());

        let upload = storage.put_object(
            &key,
            image.bytes.clone(),
            image.format.mime_type(),
            &metadata,
        );

        match tokio::time::timeout(self.timeout, upload).await {
            Ok(Ok(url)) => {
                tracing::info!(key = %key, url = %url, "Icon archived");
                Some(ArchivedAsset {
                    url,
                    key,
                    bucket: storage.bucket().to_string(),
                })
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, key = %key, "Archive upload failed, continuing without upload");
                None
            }
            Err(_) => {
                tracing::warn!(
                    key = %key,
                    timeout_secs = self.timeout.as_secs(),
                    "Archive upload timed out, continuing without upload"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockStorage, PNG_BYTES};
    use uniicon_core::{GenerationSource, ImageFormat};

    fn svg_image() -> GeneratedImage {
        GeneratedImage::new(
            b"<svg></svg>".to_vec(),
            ImageFormat::Svg,
            GenerationSource::LocalFallback,
        )
    }

    #[tokio::test]
    async fn test_unconfigured_returns_none() {
        let archiver = Archiver::new(None, Duration::from_secs(1));
        assert!(archiver.archive(&svg_image(), "icon").await.is_none());
    }

    #[tokio::test]
    async fn test_successful_upload_describes_location() {
        let storage = Arc::new(MockStorage::succeeding());
        let archiver = Archiver::new(Some(storage.clone()), Duration::from_secs(1));

        let asset = archiver.archive(&svg_image(), "blue drop").await.unwrap();
        assert!(asset.key.starts_with("images/blue_drop_"));
        assert!(asset.key.ends_with(".png"));
        assert_eq!(asset.bucket, "test-bucket");
        assert!(asset.url.ends_with(&asset.key));

        let uploads = storage.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].content_type, "image/svg+xml");
        assert_eq!(uploads[0].metadata["source"], ARCHIVE_SOURCE);
        assert_eq!(uploads[0].metadata["prompt"], "blue drop");
    }

    #[tokio::test]
    async fn test_key_suffix_is_png_for_both_formats() {
        let storage = Arc::new(MockStorage::succeeding());
        let archiver = Archiver::new(Some(storage.clone()), Duration::from_secs(1));
        let png = GeneratedImage::new(PNG_BYTES.to_vec(), ImageFormat::Png, GenerationSource::Service);

        let svg_asset = archiver.archive(&svg_image(), "star").await.unwrap();
        let png_asset = archiver.archive(&png, "star").await.unwrap();

        assert!(svg_asset.key.ends_with(".png"));
        assert!(png_asset.key.ends_with(".png"));

        let uploads = storage.uploads();
        assert_eq!(uploads[0].content_type, "image/svg+xml");
        assert_eq!(uploads[1].content_type, "image/png");
    }

    #[tokio::test]
    async fn test_upload_failure_is_swallowed() {
        let archiver = Archiver::new(
            Some(Arc::new(MockStorage::failing())),
            Duration::from_secs(1),
        );
        assert!(archiver.archive(&svg_image(), "icon").await.is_none());
    }
}
