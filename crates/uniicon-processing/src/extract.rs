//! Prompt extraction stage.

use std::sync::Arc;
use std::time::Duration;

use uniicon_core::ExtractedPrompt;
use uniicon_services::{PromptService, PromptServiceError};

/// Turns raw user input into a generation-ready prompt.
///
/// The primary path asks the remote text-understanding service; the fallback
/// is local sanitization of the raw input.
#[derive(Clone)]
pub struct PromptExtractor {
    service: Option<Arc<dyn PromptService>>,
    timeout: Duration,
}

impl PromptExtractor {
    pub fn new(service: Option<Arc<dyn PromptService>>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    /// Remote extraction. Missing credentials surface as `NotConfigured`
    /// without any network call.
    pub async fn extract_primary(
        &self,
        raw_input: &str,
    ) -> Result<ExtractedPrompt, PromptServiceError> {
        let Some(service) = &self.service else {
            tracing::debug!("No prompt service configured");
            return Err(PromptServiceError::NotConfigured);
        };

        let completion = tokio::time::timeout(self.timeout, service.extract(raw_input))
            .await
            .map_err(|_| PromptServiceError::Timeout(self.timeout))??;

        let prompt = ExtractedPrompt::from_service(&completion);
        if prompt.text.is_empty() {
            return Err(PromptServiceError::EmptyResponse);
        }

        tracing::info!(
            service = service.name(),
            prompt_chars = prompt.text.chars().count(),
            "Prompt extracted"
        );
        Ok(prompt)
    }

    /// Local sanitization of the raw input
    pub fn extract_fallback(&self, raw_input: &str) -> ExtractedPrompt {
        ExtractedPrompt::local(raw_input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockPromptService;
    use uniicon_core::GenerationSource;

    #[tokio::test]
    async fn test_no_service_is_not_configured() {
        let extractor = PromptExtractor::new(None, Duration::from_secs(1));
        let err = extractor.extract_primary("a red heart").await.unwrap_err();
        assert_eq!(err, PromptServiceError::NotConfigured);
    }

    #[tokio::test]
    async fn test_service_completion_is_capped() {
        let service = Arc::new(MockPromptService::succeeding(&"word ".repeat(100)));
        let extractor = PromptExtractor::new(Some(service.clone()), Duration::from_secs(1));

        let prompt = extractor.extract_primary("anything").await.unwrap();
        assert_eq!(prompt.source, GenerationSource::Service);
        assert!(prompt.text.chars().count() <= 203);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_service_error_is_returned() {
        let service = Arc::new(MockPromptService::failing(PromptServiceError::Unavailable(
            "connection reset".into(),
        )));
        let extractor = PromptExtractor::new(Some(service), Duration::from_secs(1));

        let err = extractor.extract_primary("anything").await.unwrap_err();
        assert!(matches!(err, PromptServiceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let service = Arc::new(
            MockPromptService::succeeding("late").with_delay(Duration::from_millis(200)),
        );
        let extractor = PromptExtractor::new(Some(service), Duration::from_millis(20));

        let err = extractor.extract_primary("anything").await.unwrap_err();
        assert!(matches!(err, PromptServiceError::Timeout(_)));
    }

    #[test]
    fn test_fallback_sanitizes_input() {
        let extractor = PromptExtractor::new(None, Duration::from_secs(1));
        let prompt = extractor.extract_fallback("  a <blue> star!  ");
        assert_eq!(prompt.text, "a blue star!");
        assert_eq!(prompt.source, GenerationSource::LocalFallback);
    }
}
