use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client as RuntimeClient;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::ImageServiceError;
use crate::traits::{ImageGenerationRequest, ImageService};

const NEGATIVE_TEXT: &str = "blurry, low quality, distorted";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanRequest {
    task_type: &'static str,
    text_to_image_params: TextToImageParams,
    image_generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextToImageParams {
    text: String,
    negative_text: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    number_of_images: u32,
    height: u32,
    width: u32,
    cfg_scale: f32,
    seed: u32,
}

#[derive(Debug, Deserialize)]
struct TitanResponse {
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<&ImageGenerationRequest> for TitanRequest {
    fn from(request: &ImageGenerationRequest) -> Self {
        Self {
            task_type: "TEXT_IMAGE",
            text_to_image_params: TextToImageParams {
                text: request.instruction(),
                negative_text: NEGATIVE_TEXT,
            },
            image_generation_config: ImageGenerationConfig {
                number_of_images: 1,
                height: request.height,
                width: request.width,
                cfg_scale: request.cfg_scale,
                seed: request.seed,
            },
        }
    }
}

/// Decode the first image of a Titan response body
fn decode_titan_response(body: &[u8]) -> Result<Bytes, ImageServiceError> {
    let response: TitanResponse = serde_json::from_slice(body)
        .map_err(|e| ImageServiceError::Other(format!("Invalid model response: {}", e)))?;

    let Some(first) = response.images.into_iter().next() else {
        if let Some(error) = response.error {
            tracing::warn!(error = %error, "Model returned no images");
        }
        return Err(ImageServiceError::NoImage);
    };

    let decoded = general_purpose::STANDARD
        .decode(first.trim())
        .map_err(|e| ImageServiceError::Other(format!("Invalid base64 image data: {}", e)))?;

    if decoded.is_empty() {
        return Err(ImageServiceError::NoImage);
    }

    Ok(Bytes::from(decoded))
}

fn map_invoke_model_error<R: std::fmt::Debug>(
    err: SdkError<InvokeModelError, R>,
) -> ImageServiceError {
    let message = DisplayErrorContext(&err).to_string();
    match err.as_service_error() {
        Some(InvokeModelError::ValidationException(_)) => ImageServiceError::Validation(message),
        Some(InvokeModelError::AccessDeniedException(_)) => {
            ImageServiceError::AccessDenied(message)
        }
        Some(InvokeModelError::ThrottlingException(_)) => ImageServiceError::Throttled,
        Some(InvokeModelError::ModelNotReadyException(_)) => ImageServiceError::ModelNotReady,
        _ => ImageServiceError::Other(message),
    }
}

/// Image generation through a Bedrock Titan image model
pub struct BedrockImageService {
    client: RuntimeClient,
    model_id: String,
}

impl BedrockImageService {
    pub fn new(sdk_config: &SdkConfig, model_id: String) -> Self {
        Self {
            client: RuntimeClient::new(sdk_config),
            model_id,
        }
    }
}

#[async_trait]
impl ImageService for BedrockImageService {
    fn name(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, request: &ImageGenerationRequest) -> Result<Bytes, ImageServiceError> {
        let payload = serde_json::to_vec(&TitanRequest::from(request))
            .map_err(|e| ImageServiceError::Other(e.to_string()))?;

        let start = std::time::Instant::now();

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(payload))
            .send()
            .await
            .map_err(map_invoke_model_error)?;

        let image = decode_titan_response(output.body().as_ref())?;

        tracing::info!(
            model_id = %self.model_id,
            seed = request.seed,
            size_bytes = image.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Image generated"
        );

        Ok(image)
    }
}
