//! Pipeline and publisher construction

use anyhow::{Context, Result};
use std::sync::Arc;
use uniicon_core::Config;
use uniicon_processing::{
    Archiver, BackgroundCleaner, FallbackPolicy, GenerationPipeline, ImageGenerator, NftPublisher,
    PromptExtractor,
};
use uniicon_services::create_bedrock_services;
use uniicon_storage::{PinataClient, Storage};

use crate::state::AppState;

/// Build the shared application state from configuration
pub async fn initialize_services(
    config: &Config,
    storage: Option<Arc<dyn Storage>>,
) -> Result<Arc<AppState>> {
    let pipeline = build_pipeline(config, storage).await;
    let nft = build_nft_publisher(config)?;

    Ok(Arc::new(AppState::new(pipeline, nft)))
}

async fn build_pipeline(config: &Config, storage: Option<Arc<dyn Storage>>) -> GenerationPipeline {
    let services = create_bedrock_services(&config.bedrock).await;

    let extractor = PromptExtractor::new(services.prompt, config.stage_timeout);
    let generator = with_fallback_rasterizer(
        ImageGenerator::new(services.image, config.stage_timeout),
        config,
    );
    let archiver = Archiver::new(storage, config.stage_timeout);

    if config.disable_fallbacks {
        tracing::warn!("Fallbacks disabled, stage failures will be returned to the client");
    }

    GenerationPipeline::new(
        extractor,
        generator,
        BackgroundCleaner::disabled(),
        archiver,
        FallbackPolicy::new(config.disable_fallbacks),
    )
}

#[cfg(feature = "rasterize")]
fn with_fallback_rasterizer(generator: ImageGenerator, config: &Config) -> ImageGenerator {
    if config.fallback_rasterize {
        tracing::info!("Fallback icons will be rasterized to PNG");
        generator.with_rasterizer(Arc::new(uniicon_processing::ResvgRasterizer::new()))
    } else {
        generator
    }
}

#[cfg(not(feature = "rasterize"))]
fn with_fallback_rasterizer(generator: ImageGenerator, config: &Config) -> ImageGenerator {
    if config.fallback_rasterize {
        tracing::warn!(
            "FALLBACK_RASTERIZE is set but the rasterize feature is not compiled in, fallback icons stay SVG"
        );
    }
    generator
}

fn build_nft_publisher(config: &Config) -> Result<Option<NftPublisher>> {
    let Some(pinata) = &config.pinata else {
        tracing::info!("PINATA_JWT not set, NFT publishing disabled");
        return Ok(None);
    };

    let client = PinataClient::new(pinata).context("Failed to build Pinata client")?;
    tracing::info!(gateway = %pinata.gateway, "NFT publishing enabled");

    Ok(Some(NftPublisher::new(client)))
}
