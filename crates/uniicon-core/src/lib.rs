//! Uniicon Core Library
//!
//! Domain models, configuration, error types and prompt text rules shared by
//! every Uniicon crate.

pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BedrockConfig, Config, PinataConfig, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    ArchivedAsset, ExtractedPrompt, GeneratedImage, GenerationRequest, GenerationSource,
    ImageFormat, NftAttribute, NftMetadata, PipelineResult,
};
pub use prompt::{sanitize_prompt, truncate_prompt, PROMPT_MAX_CHARS};
pub use storage_types::StorageBackend;
