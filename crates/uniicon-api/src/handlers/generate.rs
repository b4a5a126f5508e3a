//! Icon generation endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use uniicon_core::{AppError, GenerationRequest, PipelineResult};
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorResponse, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateResponse {
    pub result: PipelineResult,
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "generate",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Icon generated", body = GenerateResponse),
        (status = 400, description = "Missing or empty input", body = ErrorResponse),
        (status = 500, description = "Pipeline failed", body = ErrorResponse)
    )
)]
pub async fn generate_icon(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<GenerationRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.input.trim().is_empty() {
        return Err(AppError::InvalidInput("input must be a non-empty string".to_string()).into());
    }

    tracing::info!(input_len = request.input.len(), "Icon generation requested");

    let result = state.pipeline.run(&request).await?;

    tracing::info!(
        method = %result.generation_method.as_str(),
        archived = result.archived_asset.is_some(),
        "Icon generation completed"
    );

    Ok(Json(GenerateResponse { result }))
}

/// `GET /generate` is not supported
#[utoipa::path(
    get,
    path = "/generate",
    tag = "generate",
    responses(
        (status = 405, description = "Only POST is accepted", body = String, content_type = "text/plain")
    )
)]
pub async fn generate_method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
