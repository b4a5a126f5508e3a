//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use uniicon_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Uniicon API",
        version = "0.1.0",
        description = "AI icon generation: turns a free-text description into an isometric icon, with local fallbacks when the remote services are unavailable. Finished icons can be pinned to IPFS for minting."
    ),
    paths(
        handlers::generate::generate_icon,
        handlers::generate::generate_method_not_allowed,
        handlers::health::health_check,
        handlers::nft::publish_nft,
    ),
    components(schemas(
        models::GenerationRequest,
        models::PipelineResult,
        models::GenerationSource,
        models::ArchivedAsset,
        models::NftAttribute,
        models::NftMetadata,
        handlers::generate::GenerateResponse,
        handlers::health::HealthResponse,
        handlers::nft::PublishNftRequest,
        handlers::nft::PublishNftResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "generate", description = "Icon generation pipeline"),
        (name = "nft", description = "IPFS publishing for minting"),
        (name = "health", description = "Liveness and configuration"),
    )
)]
pub struct ApiDoc;
