//! Uniicon Services Library
//!
//! Contracts for the remote AI services the generation pipeline depends on,
//! their closed error taxonomies, and the AWS Bedrock implementations.

#[cfg(feature = "bedrock")]
pub mod bedrock;
pub mod error;
pub mod traits;

pub use error::{ImageServiceError, PromptServiceError};
pub use traits::{ImageGenerationRequest, ImageService, PromptService};

#[cfg(feature = "bedrock")]
pub use bedrock::{create_bedrock_services, BedrockImageService, BedrockPromptService, BedrockServices};
