//! Route definitions for the Agrimarket platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Produce marketplace
        .nest("/products", product_routes())
        // Equipment marketplace
        .nest("/tools", tool_routes())
        // Equipment bookings
        .nest("/rentals", rental_routes())
        // Advice assistant
        .nest("/chat", chat_routes())
        // Accounts
        .nest("/users", user_routes())
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/search", get(handlers::search_products))
        .route("/category/:category", get(handlers::list_products_by_category))
        .route("/:product_id", get(handlers::get_product))
}

/// Tool catalog routes
fn tool_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_tools).post(handlers::create_tool))
        .route("/available", get(handlers::list_available_tools))
        .route("/:tool_id", get(handlers::get_tool))
}

/// Rental booking routes
fn rental_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_rentals).post(handlers::create_rental))
        .route("/user/:user_id", get(handlers::list_rentals_by_renter))
}

/// Advice chat routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::post_chat_message))
        .route("/:session_id", get(handlers::get_chat_messages))
}

/// User account routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_user))
        .route("/:user_id", get(handlers::get_user))
}
