//! User account HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use shared::{NewUser, PublicUser};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Register a user account; the response never carries the password
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let input = NewUser::from_value(&body).map_err(|errors| AppError::invalid("user", errors))?;
    let user = state.store.create_user(input).await;
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

/// Get one user's public profile
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<PublicUser>> {
    let user = state
        .store
        .get_user(&user_id)
        .await
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(PublicUser::from(user)))
}
