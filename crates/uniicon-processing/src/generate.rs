//! Image generation stage.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use uniicon_core::{GeneratedImage, GenerationSource, ImageFormat};
use uniicon_services::{ImageGenerationRequest, ImageService, ImageServiceError};

use crate::icon::FallbackIcon;
use crate::raster::Rasterizer;

/// Converts a prompt into an icon image.
///
/// The primary path calls the remote image service. The fallback synthesizes
/// an SVG icon locally and, when a rasterizer is installed, converts it to
/// PNG; a rasterization failure degrades to the SVG.
#[derive(Clone)]
pub struct ImageGenerator {
    service: Option<Arc<dyn ImageService>>,
    rasterizer: Option<Arc<dyn Rasterizer>>,
    timeout: Duration,
}

impl ImageGenerator {
    pub fn new(service: Option<Arc<dyn ImageService>>, timeout: Duration) -> Self {
        Self {
            service,
            rasterizer: None,
            timeout,
        }
    }

    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    /// Remote generation only. Missing credentials surface as `NotConfigured`
    /// without any network call.
    pub async fn generate_primary(&self, prompt: &str) -> Result<GeneratedImage, ImageServiceError> {
        let Some(service) = &self.service else {
            tracing::debug!("No image service configured");
            return Err(ImageServiceError::NotConfigured);
        };

        let request = ImageGenerationRequest::icon(prompt);
        tracing::debug!(
            service = service.name(),
            seed = request.seed,
            prompt_chars = request.prompt.chars().count(),
            "Requesting image generation"
        );

        let bytes = tokio::time::timeout(self.timeout, service.generate(&request))
            .await
            .map_err(|_| ImageServiceError::Timeout(self.timeout))??;

        if bytes.is_empty() {
            return Err(ImageServiceError::NoImage);
        }

        Ok(GeneratedImage::new(
            bytes,
            ImageFormat::Png,
            GenerationSource::Service,
        ))
    }

    /// Generate with credential gating: without a configured service this is
    /// exactly [`generate_fallback`](Self::generate_fallback). Every other
    /// remote failure is returned for the caller's policy to decide.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImageServiceError> {
        match self.generate_primary(prompt).await {
            Err(ImageServiceError::NotConfigured) => Ok(self.generate_fallback(prompt)),
            other => other,
        }
    }

    /// Local icon synthesis. Never fails.
    pub fn generate_fallback(&self, prompt: &str) -> GeneratedImage {
        let icon = FallbackIcon::for_prompt(prompt);
        let svg = icon.to_svg();

        tracing::info!(
            archetype = icon.archetype.as_str(),
            colors = icon.colors.name,
            "Synthesized fallback icon"
        );

        if let Some(rasterizer) = &self.rasterizer {
            match rasterizer.rasterize(&svg) {
                Ok(png) => {
                    return GeneratedImage::new(png, ImageFormat::Png, GenerationSource::LocalFallback)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Fallback rasterization failed, returning SVG");
                }
            }
        }

        GeneratedImage::new(
            Bytes::from(svg),
            ImageFormat::Svg,
            GenerationSource::LocalFallback,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingRasterizer, MockImageService, PNG_BYTES};

    fn timeout() -> Duration {
        Duration::from_secs(1)
    }

    #[tokio::test]
    async fn test_without_credentials_generate_equals_fallback() {
        let generator = ImageGenerator::new(None, timeout());
        for prompt in ["a blue water droplet", "favorite star icon", ""] {
            let generated = generator.generate(prompt).await.unwrap();
            assert_eq!(generated, generator.generate_fallback(prompt));
        }
    }

    #[tokio::test]
    async fn test_primary_returns_service_png() {
        let service = Arc::new(MockImageService::succeeding());
        let generator = ImageGenerator::new(Some(service.clone()), timeout());

        let image = generator.generate("rocket").await.unwrap();
        assert_eq!(image.source, GenerationSource::Service);
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!(image.bytes.as_ref(), PNG_BYTES);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_long_prompt_is_capped_in_request() {
        let service = Arc::new(MockImageService::succeeding());
        let generator = ImageGenerator::new(Some(service.clone()), timeout());

        generator.generate(&"z".repeat(1000)).await.unwrap();

        let requests = service.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.chars().count() <= 203);
    }

    #[tokio::test]
    async fn test_throttling_is_returned_not_substituted() {
        let service = Arc::new(MockImageService::failing(ImageServiceError::Throttled));
        let generator = ImageGenerator::new(Some(service), timeout());

        let err = generator.generate("rocket").await.unwrap_err();
        assert_eq!(err, ImageServiceError::Throttled);
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let service = Arc::new(MockImageService::succeeding().with_delay(Duration::from_millis(200)));
        let generator = ImageGenerator::new(Some(service), Duration::from_millis(20));

        let err = generator.generate_primary("rocket").await.unwrap_err();
        assert!(matches!(err, ImageServiceError::Timeout(_)));
        assert!(err.is_substitutable());
    }

    #[test]
    fn test_fallback_is_deterministic_svg() {
        let generator = ImageGenerator::new(None, timeout());
        let first = generator.generate_fallback("favorite star icon");
        let second = generator.generate_fallback("favorite star icon");
        assert_eq!(first, second);
        assert_eq!(first.format, ImageFormat::Svg);
        assert_eq!(first.source, GenerationSource::LocalFallback);
    }

    #[test]
    fn test_rasterizer_failure_degrades_to_svg() {
        let generator =
            ImageGenerator::new(None, timeout()).with_rasterizer(Arc::new(FailingRasterizer));
        let image = generator.generate_fallback("red heart");
        assert_eq!(image.format, ImageFormat::Svg);
        assert!(image.bytes.starts_with(b"<svg"));
    }
}
