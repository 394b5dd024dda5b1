use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::documents::ExtractionError;
use crate::insights::types::UnsupportedInsightType;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A path, query string or body the extractors could not parse.
    #[error("Invalid request: {message}")]
    InvalidRequest { status: StatusCode, message: String },

    #[error(transparent)]
    UnsupportedInsightType(#[from] UnsupportedInsightType),

    #[error("Index {index} is out of range for a list of {len} responses")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Generation error: {0}")]
    Generation(#[from] LlmError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest { status, .. } => *status,
            AppError::Validation(_)
            | AppError::UnsupportedInsightType(_)
            | AppError::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Generation(LlmError::NotConfigured(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Persistence(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) | AppError::InvalidRequest { .. } => "VALIDATION_ERROR",
            AppError::UnsupportedInsightType(_) => "UNSUPPORTED_INSIGHT_TYPE",
            AppError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::Generation(LlmError::NotConfigured(_)) => "CONFIG_ERROR",
            AppError::Generation(_) => "GENERATION_ERROR",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match &self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::InvalidRequest { message, .. } => message.clone(),
            AppError::UnsupportedInsightType(e) => e.to_string(),
            AppError::IndexOutOfRange { .. } => self.to_string(),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                format!("Failed to extract text from PDF: {e}")
            }
            AppError::Generation(LlmError::NotConfigured(key)) => {
                tracing::error!("Model provider not configured: {key} is not set");
                "The insight service is not configured".to_string()
            }
            AppError::Generation(e) => {
                tracing::error!("LLM error: {e}");
                "Failed to fetch insights".to_string()
            }
            AppError::Persistence(e) => {
                tracing::error!("Database error: {e}");
                "A database error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
