//! Agrimarket Platform - Backend Server entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use agrimarket_backend::{create_app, AdviceClient, AppState, Config, MemStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agrimarket_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Agrimarket Server");
    tracing::info!("Environment: {}", config.environment);

    // Create the entity store
    let store = MemStore::new();
    if config.demo_data {
        store.seed_demo_data().await;
        tracing::info!("Seeded demo catalog");
    }

    // Create the advice assistant client
    let advice = AdviceClient::new(
        config.advice.api_key.clone(),
        config.advice.model.clone(),
        Duration::from_secs(config.advice.timeout_secs),
    );
    if config.advice.api_key.is_empty() {
        tracing::warn!("No advice API key configured; chat will answer with a canned reply");
    }

    // Create application state
    let state = AppState {
        store,
        advice,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
