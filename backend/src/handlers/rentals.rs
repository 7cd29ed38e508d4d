//! Rental booking HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use shared::{NewRental, Rental, ToolPatch};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all rentals, newest first
pub async fn list_rentals(State(state): State<AppState>) -> Json<Vec<Rental>> {
    Json(state.store.get_rentals().await)
}

/// List the rentals taken out by one user
pub async fn list_rentals_by_renter(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<Rental>> {
    Json(state.store.get_rentals_by_renter(&user_id).await)
}

/// Create a rental and mark the booked tool unavailable
///
/// The tool update is part of the booking contract but not transactional
/// with it: a rental naming an unknown tool is still recorded, and the
/// miss is only logged.
pub async fn create_rental(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Rental>)> {
    let input =
        NewRental::from_value(&body).map_err(|errors| AppError::invalid("rental", errors))?;
    let rental = state.store.create_rental(input).await;

    let patch = ToolPatch {
        is_available: Some(false),
        next_available_date: Some(rental.end_date),
        ..ToolPatch::default()
    };
    if state.store.update_tool(&rental.tool_id, patch).await.is_none() {
        tracing::warn!(
            "Rental {} references unknown tool {}; availability not updated",
            rental.id,
            rental.tool_id
        );
    }

    Ok((StatusCode::CREATED, Json(rental)))
}
