mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod screening;
mod state;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OpenAiClient;
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

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; requests will fail until it is provided");
    }

    // One completion client for the process lifetime, shared by every request
    let completion = OpenAiClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!("Completion client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        completion: Arc::new(completion),
        max_upload_bytes: config.max_upload_bytes,
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
