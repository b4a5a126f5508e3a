use async_trait::async_trait;
use bytes::Bytes;
use rand::Rng;
use uniicon_core::{truncate_prompt, PROMPT_MAX_CHARS};

use crate::error::{ImageServiceError, PromptServiceError};

/// Edge length of generated icons, in pixels
pub const ICON_SIZE: u32 = 1024;
/// Guidance scale sent with every generation request
pub const CFG_SCALE: f32 = 8.0;
/// Exclusive upper bound of the per-request random seed
pub const SEED_MAX: u32 = 1_000_000;

/// Text-understanding service that turns free-form input into an icon prompt.
#[async_trait]
pub trait PromptService: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &str;

    /// Return the raw completion for `input`. Callers cap its length.
    async fn extract(&self, input: &str) -> Result<String, PromptServiceError>;
}

/// Remote image generation service.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &str;

    /// Generate one PNG image for the request.
    async fn generate(&self, request: &ImageGenerationRequest) -> Result<Bytes, ImageServiceError>;
}

/// A single icon generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGenerationRequest {
    /// Subject text, already capped to the prompt limit
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub cfg_scale: f32,
    /// Not reproducible: drawn fresh for every request
    pub seed: u32,
}

impl ImageGenerationRequest {
    /// Build an icon request for `prompt`, capping it and drawing a random seed.
    pub fn icon(prompt: &str) -> Self {
        Self {
            prompt: truncate_prompt(prompt, PROMPT_MAX_CHARS),
            width: ICON_SIZE,
            height: ICON_SIZE,
            cfg_scale: CFG_SCALE,
            seed: rand::rng().random_range(0..SEED_MAX),
        }
    }

    /// Full instruction text sent to the model
    pub fn instruction(&self) -> String {
        format!(
            "Create a 3D isometric icon of: {}. Clean lines, soft shadows, white background.",
            self.prompt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_request_caps_prompt() {
        let request = ImageGenerationRequest::icon(&"a".repeat(500));
        assert_eq!(request.prompt.chars().count(), PROMPT_MAX_CHARS + 3);
        assert!(request.prompt.ends_with("..."));
        assert_eq!((request.width, request.height), (1024, 1024));
        assert!(request.seed < SEED_MAX);
    }

    #[test]
    fn test_short_prompt_is_untouched() {
        let request = ImageGenerationRequest::icon("rocket");
        assert_eq!(request.prompt, "rocket");
        assert_eq!(
            request.instruction(),
            "Create a 3D isometric icon of: rocket. Clean lines, soft shadows, white background."
        );
    }
}
