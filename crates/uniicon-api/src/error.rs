//! HTTP error response conversion
//!
//! Handlers return `Result<_, ApiError>`. Pipeline failures render as `500`
//! with the stage that failed; every other error goes through
//! [`ErrorMetadata`] for its status code and hint. Both use the same body.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use uniicon_core::{AppError, ErrorMetadata, LogLevel};
use uniicon_processing::{NftError, PipelineFailure};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Remediation guidance for the caller
    pub hint: String,
    pub details: String,
    /// Pipeline stage that failed, for generation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Machine-readable error code for non-pipeline errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    Pipeline(PipelineFailure),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl From<PipelineFailure> for ApiError {
    fn from(failure: PipelineFailure) -> Self {
        ApiError::Pipeline(failure)
    }
}

impl From<NftError> for ApiError {
    fn from(err: NftError) -> Self {
        let app_error = match err {
            NftError::InvalidDataUrl(_) => AppError::InvalidInput(err.to_string()),
            NftError::ImagePin(_) | NftError::MetadataPin(_) => AppError::Upstream(err.to_string()),
            NftError::MetadataEncoding(_) => AppError::Internal(err.to_string()),
        };
        ApiError::App(app_error)
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::App(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(ApiError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Pipeline(failure) => {
                tracing::error!(
                    stage = %failure.stage,
                    error = %failure.error,
                    "Icon generation failed"
                );
                let body = ErrorResponse {
                    error: failure.error,
                    hint: failure.hint,
                    details: failure.details,
                    stage: Some(failure.stage.to_string()),
                    code: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            ApiError::App(app_error) => {
                let status = StatusCode::from_u16(app_error.http_status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

                log_error(&app_error);

                let body = ErrorResponse {
                    error: app_error.client_message(),
                    hint: app_error.hint().to_string(),
                    details: app_error.detailed_message(),
                    stage: None,
                    code: Some(app_error.error_code().to_string()),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
