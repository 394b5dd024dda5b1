//! Axum route handlers for the Insights API.

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::applications::handlers::UserIdQuery;
use crate::errors::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::insights::pipeline::{
    produce_insight, run_insight_request, GeneratedInsight, InsightRequest,
};
use crate::insights::types::InsightType;
use crate::state::AppState;

/// POST /api/v1/insights
///
/// Generates an insight from two uploaded documents. Nothing is saved.
pub async fn handle_generate_insight(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<InsightRequest>,
) -> Result<Json<GeneratedInsight>, AppError> {
    let insight =
        run_insight_request(state.extractor.as_ref(), state.llm.as_ref(), &request).await?;
    Ok(Json(insight))
}

/// POST /api/v1/applications/:id/insights/:insight_type
///
/// Same pipeline, fed from the application's job spec and the user's profile CV.
/// The client saves the result through the responses endpoints.
pub async fn handle_generate_for_application(
    State(state): State<AppState>,
    ApiPath((id, insight_type)): ApiPath<(Uuid, String)>,
    ApiQuery(params): ApiQuery<UserIdQuery>,
) -> Result<Json<GeneratedInsight>, AppError> {
    let insight_type: InsightType = insight_type.parse()?;

    let application = state
        .applications
        .find_by_id(id, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    let job_spec_url = application.job_spec_url.ok_or_else(|| {
        AppError::Validation(format!("Application {id} has no job spec uploaded"))
    })?;

    let cv_url = state
        .profiles
        .find(params.user_id)
        .await?
        .and_then(|p| p.cv_url)
        .ok_or_else(|| AppError::Validation("No CV uploaded to the user profile".to_string()))?;

    let insight = produce_insight(
        state.extractor.as_ref(),
        state.llm.as_ref(),
        &job_spec_url,
        &cv_url,
        insight_type,
    )
    .await?;
    Ok(Json(insight))
}
