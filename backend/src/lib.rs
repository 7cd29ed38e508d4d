//! Agrimarket Platform - Backend Server
//!
//! A small agricultural marketplace: farmers list produce and rentable
//! equipment, buyers browse and search, and an AI chat widget answers
//! farming questions.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod storage;

pub use config::Config;
pub use external::AdviceClient;
pub use storage::MemStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: MemStore,
    pub advice: AdviceClient,
    pub config: Arc<Config>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Agrimarket Platform API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
