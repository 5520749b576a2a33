mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod profiles;
mod projects;
mod render;
mod routes;
mod state;
mod storage;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::profiles::PgProfileStore;
use crate::projects::extractor::PlaceholderTable;
use crate::projects::workflow::ProjectWorkflow;
use crate::render::CommandPdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::FsArtifactStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Practice API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let profiles = Arc::new(PgProfileStore::new(db));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    );
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    // Initialize renderer and artifact store
    let renderer = CommandPdfRenderer::new(config.pdf_renderer_bin.clone())
        .with_args(config.pdf_renderer_args.clone());
    info!("PDF renderer: {}", config.pdf_renderer_bin);

    tokio::fs::create_dir_all(&config.projects_dir).await?;
    let artifacts = Arc::new(FsArtifactStore::new(config.projects_dir.clone()));
    info!("Artifact store at {}", config.projects_dir.display());

    let workflow = ProjectWorkflow::new(
        profiles.clone(),
        Arc::new(llm),
        Arc::new(renderer),
        artifacts.clone(),
        Arc::new(PlaceholderTable::builtin()),
    );

    // Build app state
    let state = AppState {
        profiles,
        artifacts,
        workflow: Arc::new(workflow),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
