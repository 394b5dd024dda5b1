//! Axum route handlers for applications and their saved insight responses.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::applications::response_store::{append_response, list_responses, remove_response};
use crate::applications::validation::{prepare_changes, prepare_new};
use crate::errors::AppError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::insights::types::InsightType;
use crate::models::application::{Application, ApplicationChanges, NewApplication};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SaveResponseRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ResponseListResponse {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub responses: Vec<String>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Application {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Application CRUD
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<UserIdQuery>,
) -> Result<Json<Vec<Application>>, AppError> {
    let rows = state.applications.list(params.user_id).await?;
    Ok(Json(rows.into_iter().map(Application::from).collect()))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<UserIdQuery>,
    ApiJson(request): ApiJson<NewApplication>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let new = prepare_new(request)?;
    let row = state.applications.create(params.user_id, &new).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(params): ApiQuery<UserIdQuery>,
) -> Result<Json<Application>, AppError> {
    let row = state
        .applications
        .find_by_id(id, params.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(row.into()))
}

/// PUT /api/v1/applications/:id
///
/// Partial update. A `*Responses` field overwrites that type's whole list.
pub async fn handle_update_application(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(params): ApiQuery<UserIdQuery>,
    ApiJson(request): ApiJson<ApplicationChanges>,
) -> Result<Json<Application>, AppError> {
    let changes = prepare_changes(request)?;
    let row = state
        .applications
        .update(id, params.user_id, &changes)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(row.into()))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(params): ApiQuery<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !state.applications.delete(id, params.user_id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Saved insight responses
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/applications/:id/responses/:insight_type
pub async fn handle_list_responses(
    State(state): State<AppState>,
    ApiPath((id, insight_type)): ApiPath<(Uuid, String)>,
    ApiQuery(params): ApiQuery<UserIdQuery>,
) -> Result<Json<ResponseListResponse>, AppError> {
    let insight_type: InsightType = insight_type.parse()?;
    let responses =
        list_responses(state.applications.as_ref(), id, params.user_id, insight_type).await?;
    Ok(Json(ResponseListResponse {
        insight_type,
        responses,
    }))
}

/// POST /api/v1/applications/:id/responses/:insight_type
pub async fn handle_save_response(
    State(state): State<AppState>,
    ApiPath((id, insight_type)): ApiPath<(Uuid, String)>,
    ApiQuery(params): ApiQuery<UserIdQuery>,
    ApiJson(request): ApiJson<SaveResponseRequest>,
) -> Result<Json<ResponseListResponse>, AppError> {
    let insight_type: InsightType = insight_type.parse()?;
    let responses = append_response(
        state.applications.as_ref(),
        id,
        params.user_id,
        insight_type,
        request.text,
    )
    .await?;
    Ok(Json(ResponseListResponse {
        insight_type,
        responses,
    }))
}

/// DELETE /api/v1/applications/:id/responses/:insight_type/:index
pub async fn handle_remove_response(
    State(state): State<AppState>,
    ApiPath((id, insight_type, index)): ApiPath<(Uuid, String, usize)>,
    ApiQuery(params): ApiQuery<UserIdQuery>,
) -> Result<Json<ResponseListResponse>, AppError> {
    let insight_type: InsightType = insight_type.parse()?;
    let responses = remove_response(
        state.applications.as_ref(),
        id,
        params.user_id,
        insight_type,
        index,
    )
    .await?;
    Ok(Json(ResponseListResponse {
        insight_type,
        responses,
    }))
}
