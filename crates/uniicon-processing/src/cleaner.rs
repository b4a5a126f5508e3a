//! Background cleaning stage.
//!
//! Background removal is currently switched off: without a remover the stage
//! is the identity. A remover can be installed again, and its failures then go
//! through the fallback policy like any other stage (the fallback being the
//! uncleaned image).

use std::sync::Arc;

use async_trait::async_trait;
use uniicon_core::GeneratedImage;

use crate::error::CleaningError;

/// Removes the background of a generated image
#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    async fn remove_background(&self, image: &GeneratedImage) -> Result<GeneratedImage, CleaningError>;
}

#[derive(Clone, Default)]
pub struct BackgroundCleaner {
    remover: Option<Arc<dyn BackgroundRemover>>,
}

impl BackgroundCleaner {
    /// Identity cleaner
    pub fn disabled() -> Self {
        Self { remover: None }
    }

    pub fn with_remover(remover: Arc<dyn BackgroundRemover>) -> Self {
        Self {
            remover: Some(remover),
        }
    }

    pub async fn clean(&self, image: GeneratedImage) -> Result<GeneratedImage, CleaningError> {
        match &self.remover {
            None => {
                tracing::debug!("Background cleaning disabled, returning original image");
                Ok(image)
            }
            Some(remover) => remover.remove_background(&image).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniicon_core::{GenerationSource, ImageFormat};

    #[tokio::test]
    async fn test_disabled_cleaner_is_identity() {
        let image = GeneratedImage::new(
            b"<svg/>".to_vec(),
            ImageFormat::Svg,
            GenerationSource::LocalFallback,
        );
        let cleaned = BackgroundCleaner::disabled().clean(image.clone()).await.unwrap();
        assert_eq!(cleaned, image);
    }
}
