use axum::{extract::State, Json};
use tracing::info;
use uuid::Uuid;

use crate::documents::data_url::decode_data_url;
use crate::errors::AppError;
use crate::extractors::{ApiJson, ApiPath};
use crate::models::profile::{ProfileUpdate, UserProfileRow};
use crate::state::AppState;

/// GET /api/v1/users/:user_id/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<UserProfileRow>, AppError> {
    let profile = state
        .profiles
        .find(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {user_id} not found")))?;
    Ok(Json(profile))
}

/// PUT /api/v1/users/:user_id/profile
///
/// A new CV must be a decodable base64 data URL; its PDF content is only
/// parsed when an insight is requested.
pub async fn handle_upsert_profile(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<UserProfileRow>, AppError> {
    if let Some(cv_url) = &update.cv_url {
        decode_data_url(cv_url)
            .map_err(|e| AppError::Validation(format!("cvUrl is not a valid document: {e}")))?;
    }

    let profile = state.profiles.upsert(user_id, &update).await?;
    info!("Updated profile for user {user_id}");
    Ok(Json(profile))
}
