//! Product listing HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use shared::{NewProduct, Product};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query string for product search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// List all products, newest first
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.get_products().await)
}

/// Search products by free-text query; no query means no results
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Product>> {
    let results = match query.q.as_deref() {
        Some(q) if !q.is_empty() => state.store.search_products(q).await,
        _ => Vec::new(),
    };
    Json(results)
}

/// List the products in one category
pub async fn list_products_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<Product>> {
    Json(state.store.get_products_by_category(&category).await)
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .store
        .get_product(&product_id)
        .await
        .ok_or_else(|| AppError::not_found("Product"))?;
    Ok(Json(product))
}

/// Create a product listing
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let input =
        NewProduct::from_value(&body).map_err(|errors| AppError::invalid("product", errors))?;
    let product = state.store.create_product(input).await;
    Ok((StatusCode::CREATED, Json(product)))
}
