//! Insight Generator: sends a built prompt to the model and returns its text.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::ASSISTANT_SYSTEM;
use crate::llm_client::{CompletionClient, LlmError};

/// One completion per call. No retry here; `LlmClient` already retries
/// transient provider failures.
pub async fn generate_insight(llm: &dyn CompletionClient, prompt: &str) -> Result<String, AppError> {
    let text = llm.complete(ASSISTANT_SYSTEM, prompt).await?;

    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent.into());
    }

    info!("Generated insight: {} chars", text.len());
    Ok(text)
}
