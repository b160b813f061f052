mod config;
mod errors;
mod grading;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GradingProvider, OpenAiClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting grading API v{}", env!("CARGO_PKG_VERSION"));

    // Missing key is not fatal: requests fail with "API key not configured".
    let provider: Option<Arc<dyn GradingProvider>> = match &config.openai_api_key {
        Some(key) => {
            let client = OpenAiClient::new(
                key.clone(),
                config.openai_model.clone(),
                config.openai_base_url.clone(),
            );
            info!("OpenAI client initialized (model: {})", client.model());
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; grading requests will fail");
            None
        }
    };

    info!("Comment style: {:?}", config.comment_style);
    let state = AppState::new(provider, config.comment_style);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
