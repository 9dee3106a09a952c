mod analysis;
mod config;
mod embedding;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::feedback::FeedbackClient;
use crate::analysis::pipeline::AnalysisPipeline;
use crate::config::Config;
use crate::embedding::EmbeddingClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    let embedder = EmbeddingClient::new(config.embeddings_url.clone(), config.embed_model.clone())?;
    info!(
        "Embedding client initialized (model: {}, endpoint: {})",
        embedder.model(),
        config.embeddings_url
    );

    let llm = LlmClient::new(config.chat_url.clone(), config.chat_model.clone())?;
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm.model(),
        config.chat_url
    );

    info!("Section split mode: {}", config.split_mode.as_str());
    let pipeline = AnalysisPipeline::new(
        Arc::new(embedder),
        FeedbackClient::new(Arc::new(llm)),
        config.split_mode,
    );

    let port = config.port;
    let state = AppState {
        pipeline: Arc::new(pipeline),
        config: Arc::new(config),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
