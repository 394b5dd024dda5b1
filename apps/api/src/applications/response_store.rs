//! Response Store: the saved-insight history of an application.
//!
//! Each list is keyed by `(application_id, insight_type)` and kept oldest
//! first. Every mutation reads the current list, edits a copy and writes the
//! complete list back through `ApplicationRepository::overwrite_responses`.
//! Two writers racing on the same list: the last write wins.

use tracing::info;
use uuid::Uuid;

use crate::applications::repository::ApplicationRepository;
use crate::errors::AppError;
use crate::insights::types::InsightType;
use crate::models::application::ApplicationRow;

fn not_found(application_id: Uuid) -> AppError {
    AppError::NotFound(format!("Application {application_id} not found"))
}

async fn load(
    repo: &dyn ApplicationRepository,
    application_id: Uuid,
    user_id: Uuid,
) -> Result<ApplicationRow, AppError> {
    repo.find_by_id(application_id, user_id)
        .await?
        .ok_or_else(|| not_found(application_id))
}

async fn write(
    repo: &dyn ApplicationRepository,
    application_id: Uuid,
    user_id: Uuid,
    insight_type: InsightType,
    responses: &[String],
) -> Result<Vec<String>, AppError> {
    let row = repo
        .overwrite_responses(application_id, user_id, insight_type, responses)
        .await?
        .ok_or_else(|| not_found(application_id))?;
    Ok(row.insight_responses.responses(insight_type).to_vec())
}

/// The saved responses of one type, oldest first.
pub async fn list_responses(
    repo: &dyn ApplicationRepository,
    application_id: Uuid,
    user_id: Uuid,
    insight_type: InsightType,
) -> Result<Vec<String>, AppError> {
    let row = load(repo, application_id, user_id).await?;
    Ok(row.insight_responses.responses(insight_type).to_vec())
}

/// Appends `text` to the end of the list and returns the refreshed list.
pub async fn append_response(
    repo: &dyn ApplicationRepository,
    application_id: Uuid,
    user_id: Uuid,
    insight_type: InsightType,
    text: String,
) -> Result<Vec<String>, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "response text cannot be empty".to_string(),
        ));
    }

    let row = load(repo, application_id, user_id).await?;
    let mut responses = row.insight_responses.responses(insight_type).to_vec();
    responses.push(text);

    let saved = write(repo, application_id, user_id, insight_type, &responses).await?;
    info!(
        "Saved {insight_type} response #{} on application {application_id}",
        saved.len()
    );
    Ok(saved)
}

/// Removes the entry at `index` and returns the refreshed list.
/// An out-of-range index fails without writing anything.
pub async fn remove_response(
    repo: &dyn ApplicationRepository,
    application_id: Uuid,
    user_id: Uuid,
    insight_type: InsightType,
    index: usize,
) -> Result<Vec<String>, AppError> {
    let row = load(repo, application_id, user_id).await?;
    let mut responses = row.insight_responses.responses(insight_type).to_vec();

    if index >= responses.len() {
        return Err(AppError::IndexOutOfRange {
            index,
            len: responses.len(),
        });
    }
    responses.remove(index);

    let saved = write(repo, application_id, user_id, insight_type, &responses).await?;
    info!("Removed {insight_type} response {index} from application {application_id}");
    Ok(saved)
}
