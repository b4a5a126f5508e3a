//! Error taxonomies for remote AI services.
//!
//! SDK and transport errors are mapped into these enums once, at the call
//! boundary; the pipeline only ever switches on the variants.

use std::time::Duration;
use thiserror::Error;

/// Failures of the text-understanding (prompt extraction) service.
///
/// Every variant is substitutable: extraction always has a local fallback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptServiceError {
    #[error("AccessDeniedException: {0}")]
    AccessDenied(String),

    #[error("Prompt extraction throttled: {0}")]
    Throttled(String),

    #[error("Prompt extraction request rejected: {0}")]
    Rejected(String),

    #[error("Prompt extraction service unavailable: {0}")]
    Unavailable(String),

    #[error("Prompt extraction returned an empty completion")]
    EmptyResponse,

    #[error("Prompt extraction service not configured (no credentials)")]
    NotConfigured,

    #[error("Prompt extraction timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl PromptServiceError {
    pub fn is_access_denied(&self) -> bool {
        matches!(self, PromptServiceError::AccessDenied(_))
    }
}

/// Failures of the image-generation service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageServiceError {
    #[error("ValidationException: {0}")]
    Validation(String),

    #[error("AccessDeniedException: {0}")]
    AccessDenied(String),

    #[error("Request throttled. Please try again later.")]
    Throttled,

    #[error("Model not ready. Please try again in a few moments.")]
    ModelNotReady,

    #[error("No images generated in response")]
    NoImage,

    #[error("Image generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Image generation service not configured (no credentials)")]
    NotConfigured,

    #[error("Image generation failed: {0}")]
    Other(String),
}

impl ImageServiceError {
    /// Whether the pipeline may replace this failure with a locally synthesized icon.
    ///
    /// Throttling and model warm-up are transient conditions the caller must
    /// retry; they are never hidden behind a fallback image.
    pub fn is_substitutable(&self) -> bool {
        !matches!(
            self,
            ImageServiceError::Throttled | ImageServiceError::ModelNotReady
        )
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, ImageServiceError::AccessDenied(_))
    }
}
