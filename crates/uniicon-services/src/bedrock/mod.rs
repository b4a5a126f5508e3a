//! AWS Bedrock implementations of the remote AI services.
//!
//! One `SdkConfig` is built at startup from explicit credentials and shared by
//! both clients. Without credentials no client is built and the pipeline runs
//! its local fallbacks.

mod agent;
mod image;

pub use agent::BedrockPromptService;
pub use image::BedrockImageService;

use std::sync::Arc;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_bedrockruntime::config::Credentials;
use uniicon_core::BedrockConfig;

use crate::traits::{ImageService, PromptService};

const CREDENTIALS_PROVIDER_NAME: &str = "uniicon-environment";

/// Remote service handles; `None` when credentials are absent.
#[derive(Clone, Default)]
pub struct BedrockServices {
    pub prompt: Option<Arc<dyn PromptService>>,
    pub image: Option<Arc<dyn ImageService>>,
}

async fn load_sdk_config(config: &BedrockConfig) -> Option<SdkConfig> {
    let creds = config.credentials.as_ref()?;

    let credentials = Credentials::new(
        creds.access_key_id.clone(),
        creds.secret_access_key.clone(),
        None,
        None,
        CREDENTIALS_PROVIDER_NAME,
    );

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .load()
        .await;

    Some(sdk_config)
}

/// Build the Bedrock prompt and image services from configuration
pub async fn create_bedrock_services(config: &BedrockConfig) -> BedrockServices {
    let Some(sdk_config) = load_sdk_config(config).await else {
        tracing::warn!("No AWS credentials found, prompt extraction and image generation will use local fallbacks");
        return BedrockServices::default();
    };

    tracing::info!(
        region = %config.region,
        model_id = %config.generate_model_id,
        agent_id = %config.agent_id,
        "Bedrock services initialized"
    );

    BedrockServices {
        prompt: Some(Arc::new(BedrockPromptService::new(
            &sdk_config,
            config.agent_id.clone(),
            config.agent_alias_id.clone(),
        ))),
        image: Some(Arc::new(BedrockImageService::new(
            &sdk_config,
            config.generate_model_id.clone(),
        ))),
    }
}
