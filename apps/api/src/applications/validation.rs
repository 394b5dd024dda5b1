use crate::errors::AppError;
use crate::models::application::{
    ApplicationChanges, NewApplication, APPLICATION_STATUSES, DEFAULT_STATUS,
};

/// Trims, drops empty tags and removes duplicates, keeping first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(value.to_string())
}

fn check_status(status: &str) -> Result<(), AppError> {
    if APPLICATION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "status must be one of: {}",
            APPLICATION_STATUSES.join(", ")
        )))
    }
}

/// Validates and normalizes a create request in place.
pub fn prepare_new(mut new: NewApplication) -> Result<NewApplication, AppError> {
    new.role = require_text("role", &new.role)?;
    new.company = require_text("company", &new.company)?;
    let status = new.status.take().unwrap_or_else(|| DEFAULT_STATUS.to_string());
    check_status(&status)?;
    new.status = Some(status);
    new.tags = normalize_tags(&new.tags);
    Ok(new)
}

/// Validates and normalizes a partial update in place.
pub fn prepare_changes(mut changes: ApplicationChanges) -> Result<ApplicationChanges, AppError> {
    if let Some(role) = &changes.role {
        changes.role = Some(require_text("role", role)?);
    }
    if let Some(company) = &changes.company {
        changes.company = Some(require_text("company", company)?);
    }
    if let Some(status) = &changes.status {
        check_status(status)?;
    }
    if let Some(tags) = &changes.tags {
        changes.tags = Some(normalize_tags(tags));
    }
    Ok(changes)
}
