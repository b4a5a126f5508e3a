//! Request-scoped pipeline values
//!
//! None of these are mutated after construction; each stage consumes its
//! input and produces a new value for the next stage.

use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

use crate::prompt::{sanitize_prompt, truncate_prompt, PROMPT_MAX_CHARS};

/// Body of `POST /generate`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerationRequest {
    /// Free-text description of the icon to generate
    pub input: String,
}

/// Which path produced a stage's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationSource {
    Service,
    LocalFallback,
}

impl GenerationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationSource::Service => "service",
            GenerationSource::LocalFallback => "local-fallback",
        }
    }
}

impl Display for GenerationSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Image encoding produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Generation-ready prompt.
///
/// `text` is always capped at [`PROMPT_MAX_CHARS`] characters plus ellipsis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPrompt {
    pub text: String,
    pub source: GenerationSource,
}

impl ExtractedPrompt {
    /// Wrap text returned by the extraction service.
    pub fn from_service(text: &str) -> Self {
        Self {
            text: truncate_prompt(text.trim(), PROMPT_MAX_CHARS),
            source: GenerationSource::Service,
        }
    }

    /// Locally sanitized version of the raw user input.
    pub fn local(raw_input: &str) -> Self {
        Self {
            text: sanitize_prompt(raw_input),
            source: GenerationSource::LocalFallback,
        }
    }
}

/// Raw image bytes owned by a single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Bytes,
    pub format: ImageFormat,
    pub source: GenerationSource,
}

impl GeneratedImage {
    pub fn new(bytes: impl Into<Bytes>, format: ImageFormat, source: GenerationSource) -> Self {
        Self {
            bytes: bytes.into(),
            format,
            source,
        }
    }

    /// Standard base64 encoding of the image bytes
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Location of an archived copy of the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArchivedAsset {
    pub url: String,
    pub key: String,
    pub bucket: String,
}

/// Terminal artifact returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// `data:` URL ready to embed in an `<img>` tag
    pub display_url: String,
    pub base64: String,
    /// `png` or `svg`
    pub format: String,
    pub generation_method: GenerationSource,
    pub archived_asset: Option<ArchivedAsset>,
    /// Provenance-specific message for the user
    pub message: String,
}

/// ERC-721 metadata attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NftAttribute {
    pub trait_type: String,
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
}

impl NftAttribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// ERC-721 style token metadata pinned alongside a published icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    /// Gateway URL of the pinned image
    pub image: String,
    pub external_url: String,
    pub attributes: Vec<NftAttribute>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_source_wire_names() {
        assert_eq!(
            serde_json::to_value(GenerationSource::LocalFallback).unwrap(),
            serde_json::json!("local-fallback")
        );
        assert_eq!(
            serde_json::to_value(GenerationSource::Service).unwrap(),
            serde_json::json!("service")
        );
    }

    #[test]
    fn test_image_format_mime_types() {
        assert_eq!(ImageFormat::Svg.mime_type(), "image/svg+xml");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_extracted_prompt_from_service_is_capped() {
        let prompt = ExtractedPrompt::from_service(&"a".repeat(500));
        assert_eq!(prompt.text.chars().count(), 203);
        assert_eq!(prompt.source, GenerationSource::Service);
    }

    #[test]
    fn test_pipeline_result_serializes_camel_case() {
        let result = PipelineResult {
            display_url: "data:image/png;base64,AA==".to_string(),
            base64: "AA==".to_string(),
            format: "png".to_string(),
            generation_method: GenerationSource::Service,
            archived_asset: None,
            message: "ok".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("displayUrl").is_some());
        assert_eq!(json["generationMethod"], "service");
        assert!(json["archivedAsset"].is_null());
    }
}
