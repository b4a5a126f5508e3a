use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Which backends are wired in; a `false` stage runs on its local fallback.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub extraction: bool,
    pub generation: bool,
    pub archive: bool,
    pub ipfs: bool,
    pub fallbacks_disabled: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let pipeline = &state.pipeline;
    Json(HealthResponse {
        status: "ok".to_string(),
        extraction: pipeline.extractor().is_configured(),
        generation: pipeline.generator().is_configured(),
        archive: pipeline.archiver().is_configured(),
        ipfs: state.nft.is_some(),
        fallbacks_disabled: pipeline.policy().fallbacks_disabled(),
    })
}
