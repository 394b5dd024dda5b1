use std::sync::Arc;

use crate::applications::repository::ApplicationRepository;
use crate::config::Config;
use crate::documents::DocumentExtractor;
use crate::llm_client::CompletionClient;
use crate::profiles::repository::ProfileRepository;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every handle is built once at startup and reused for each request.
#[derive(Clone)]
pub struct AppState {
    pub applications: Arc<dyn ApplicationRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    /// Default: PdfTextExtractor.
    pub extractor: Arc<dyn DocumentExtractor>,
    /// Default: LlmClient against the configured OpenAI-compatible provider.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Config,
}
