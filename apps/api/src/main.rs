mod applications;
mod config;
mod db;
mod documents;
mod errors;
mod extractors;
mod insights;
mod llm_client;
mod models;
mod profiles;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::applications::repository::PgApplicationRepository;
use crate::config::Config;
use crate::db::create_pool;
use crate::documents::PdfTextExtractor;
use crate::llm_client::{LlmClient, LlmSettings};
use crate::profiles::repository::PgProfileRepository;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Applica API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(LlmSettings::from_config(&config))?;
    match llm.model() {
        Some(model) if config.openai_api_key.is_some() => {
            info!("LLM client initialized (model: {model})")
        }
        _ => warn!("OPENAI_API_KEY or OPENAI_MODEL is not set; insight requests will fail"),
    }

    // Build app state
    let state = AppState {
        applications: Arc::new(PgApplicationRepository::new(db.clone())),
        profiles: Arc::new(PgProfileRepository::new(db)),
        extractor: Arc::new(PdfTextExtractor),
        llm: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
