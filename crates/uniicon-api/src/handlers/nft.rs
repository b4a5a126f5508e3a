//! NFT publishing endpoint: pins a generated icon and its token metadata to IPFS.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uniicon_core::{AppError, NftAttribute, NftMetadata};
use uniicon_processing::{DataUrl, PublishedNft};
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorResponse, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishNftRequest {
    /// `data:<mime>;base64,<payload>` URL, as returned in `displayUrl`
    pub image: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Extra attributes appended after the standard ones
    #[serde(default)]
    pub attributes: Vec<NftAttribute>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishNftResponse {
    pub image_url: String,
    pub metadata_url: String,
    pub token_uri: String,
    pub metadata: NftMetadata,
}

impl From<PublishedNft> for PublishNftResponse {
    fn from(published: PublishedNft) -> Self {
        Self {
            image_url: published.image_url,
            metadata_url: published.metadata_url,
            token_uri: published.token_uri,
            metadata: published.metadata,
        }
    }
}

#[utoipa::path(
    post,
    path = "/nft",
    tag = "nft",
    request_body = PublishNftRequest,
    responses(
        (status = 200, description = "Image and metadata pinned", body = PublishNftResponse),
        (status = 400, description = "Malformed image data URL", body = ErrorResponse),
        (status = 502, description = "Pinning service failed", body = ErrorResponse),
        (status = 503, description = "IPFS pinning not configured", body = ErrorResponse)
    )
)]
pub async fn publish_nft(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<PublishNftRequest>,
) -> Result<Json<PublishNftResponse>, ApiError> {
    let publisher = state
        .nft
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("IPFS pinning".to_string()))?;

    let image = DataUrl::parse(&request.image)?;

    let published = publisher
        .publish(
            image,
            request.name.as_deref(),
            request.description.as_deref(),
            request.attributes,
        )
        .await?;

    tracing::info!(token_uri = %published.token_uri, "NFT metadata published");

    Ok(Json(published.into()))
}
