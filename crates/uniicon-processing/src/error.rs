//! Stage-tagged pipeline errors and their client-facing rendering.

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;
use uniicon_core::ImageFormat;
use uniicon_services::{ImageServiceError, PromptServiceError};

const ACCESS_DENIED_MESSAGE: &str =
    "AWS Access Denied: Your IAM user doesn't have permission to use Bedrock services.";
const ACCESS_DENIED_HINT: &str = "To fix this, update your IAM policy to allow bedrock:InvokeModel and bedrock:InvokeAgent permissions, or remove any explicit DENY policies.";
const FALLBACKS_DISABLED_HINT: &str = "Set DISABLE_FALLBACKS=0 to enable graceful fallbacks.";
const THROTTLED_HINT: &str = "The image service is rate limiting requests. Wait a few seconds and try again.";
const MODEL_NOT_READY_HINT: &str = "The image model is still warming up. Try again in a few moments.";
const TIMEOUT_HINT: &str = "The remote service did not respond in time. Try the request again.";
const NOT_CONFIGURED_HINT: &str = "Configure AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY, or set DISABLE_FALLBACKS=0 to enable graceful fallbacks.";
const INTERNAL_HINT: &str = "This is an internal error. Try the request again and check the server logs if it persists.";

/// Pipeline stage a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Extracting,
    Generating,
    Cleaning,
    Archiving,
    Packaging,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Extracting => "extracting",
            Stage::Generating => "generating",
            Stage::Cleaning => "cleaning",
            Stage::Archiving => "archiving",
            Stage::Packaging => "packaging",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Background cleaning failure. No cleaner is active today.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CleaningError {
    #[error("Background removal failed: {0}")]
    Failed(String),
}

/// Corrupted image buffer detected while packaging
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PackagingError {
    #[error("Image buffer is empty")]
    EmptyBuffer,

    #[error("Image buffer does not look like {0} data")]
    SignatureMismatch(ImageFormat),
}

/// A hard pipeline failure, tagged with the stage that produced it
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Extraction failed: {0}")]
    Extraction(#[source] PromptServiceError),

    #[error("Image generation failed: {0}")]
    Generation(#[source] ImageServiceError),

    #[error("Background cleaning failed: {0}")]
    Cleaning(#[source] CleaningError),

    #[error("Packaging failed: {0}")]
    Packaging(#[from] PackagingError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Extraction(_) => Stage::Extracting,
            PipelineError::Generation(_) => Stage::Generating,
            PipelineError::Cleaning(_) => Stage::Cleaning,
            PipelineError::Packaging(_) => Stage::Packaging,
        }
    }

    /// Access-control denial from either Bedrock service
    pub fn is_access_denied(&self) -> bool {
        match self {
            PipelineError::Extraction(e) => e.is_access_denied(),
            PipelineError::Generation(e) => e.is_access_denied(),
            _ => false,
        }
    }

    /// Render as a client-facing failure with a remediation hint
    pub fn into_failure(self, fallbacks_disabled: bool) -> PipelineFailure {
        let stage = self.stage();
        let details = self.to_string();

        if self.is_access_denied() {
            return PipelineFailure {
                stage,
                error: ACCESS_DENIED_MESSAGE.to_string(),
                hint: ACCESS_DENIED_HINT.to_string(),
                details,
            };
        }

        let hint = match &self {
            PipelineError::Generation(ImageServiceError::Throttled) => THROTTLED_HINT,
            PipelineError::Generation(ImageServiceError::ModelNotReady) => MODEL_NOT_READY_HINT,
            PipelineError::Generation(ImageServiceError::Timeout(_))
            | PipelineError::Extraction(PromptServiceError::Timeout(_)) => TIMEOUT_HINT,
            PipelineError::Generation(ImageServiceError::NotConfigured)
            | PipelineError::Extraction(PromptServiceError::NotConfigured) => NOT_CONFIGURED_HINT,
            PipelineError::Packaging(_) => INTERNAL_HINT,
            _ if fallbacks_disabled => FALLBACKS_DISABLED_HINT,
            _ => INTERNAL_HINT,
        };

        PipelineFailure {
            stage,
            error: details.clone(),
            hint: hint.to_string(),
            details,
        }
    }
}

/// Terminal failure of a pipeline run, as shown to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineFailure {
    pub stage: Stage,
    pub error: String,
    pub hint: String,
    pub details: String,
}

impl Display for PipelineFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} (stage: {})", self.error, self.stage)
    }
}

impl std::error::Error for PipelineFailure {}
