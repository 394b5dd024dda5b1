//! Insight pipeline: orchestrates one insight request.
//!
//! Flow: validate type → extract job spec + CV (concurrently) →
//!       build prompt → generate → return text (not persisted).

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::DocumentExtractor;
use crate::errors::AppError;
use crate::insights::generator::generate_insight;
use crate::insights::prompts::build_prompt;
use crate::insights::types::InsightType;
use crate::llm_client::CompletionClient;

/// Request body for `POST /api/v1/insights`.
///
/// `type` stays a raw string so an unknown value is reported as
/// `UnsupportedInsightType` instead of a generic body rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    #[serde(default)]
    pub job_spec_url: String,
    #[serde(default)]
    pub user_cv_url: String,
    #[serde(rename = "type", default)]
    pub insight_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedInsight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub insight: String,
}

/// Runs the pipeline for a raw request. The type is checked before any
/// document is decoded.
pub async fn run_insight_request(
    extractor: &dyn DocumentExtractor,
    llm: &dyn CompletionClient,
    request: &InsightRequest,
) -> Result<GeneratedInsight, AppError> {
    let insight_type: InsightType = request.insight_type.parse()?;
    produce_insight(
        extractor,
        llm,
        &request.job_spec_url,
        &request.user_cv_url,
        insight_type,
    )
    .await
}

/// Extracts both documents, builds the prompt and asks the model.
/// The first extraction failure aborts the request; nothing is generated.
pub async fn produce_insight(
    extractor: &dyn DocumentExtractor,
    llm: &dyn CompletionClient,
    job_spec_url: &str,
    cv_url: &str,
    insight_type: InsightType,
) -> Result<GeneratedInsight, AppError> {
    let (spec_text, cv_text) = tokio::try_join!(
        extractor.extract_text(job_spec_url),
        extractor.extract_text(cv_url)
    )?;
    info!(
        "Extracted job spec ({} chars) and CV ({} chars) for {insight_type} insight",
        spec_text.len(),
        cv_text.len()
    );

    let prompt = build_prompt(&spec_text, &cv_text, insight_type);
    let insight = generate_insight(llm, &prompt).await?;

    Ok(GeneratedInsight {
        insight_type,
        insight,
    })
}
