//! Tool listing HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use shared::{NewTool, Tool};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all tools, newest first
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<Tool>> {
    Json(state.store.get_tools().await)
}

/// List the tools currently available to rent
pub async fn list_available_tools(State(state): State<AppState>) -> Json<Vec<Tool>> {
    Json(state.store.get_available_tools().await)
}

/// Get a single tool
pub async fn get_tool(
    State(state): State<AppState>,
    Path(tool_id): Path<String>,
) -> AppResult<Json<Tool>> {
    let tool = state
        .store
        .get_tool(&tool_id)
        .await
        .ok_or_else(|| AppError::not_found("Tool"))?;
    Ok(Json(tool))
}

/// Create a tool listing
pub async fn create_tool(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Tool>)> {
    let input = NewTool::from_value(&body).map_err(|errors| AppError::invalid("tool", errors))?;
    let tool = state.store.create_tool(input).await;
    Ok((StatusCode::CREATED, Json(tool)))
}
