//! Advice chat HTTP handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use shared::{ChatMessage, ChatRequest, ChatTurn, NewChatMessage};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Get the transcript for one session, oldest first
pub async fn get_chat_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Vec<ChatMessage>> {
    Json(state.store.get_chat_messages(&session_id).await)
}

/// Run one chat turn: store the question, ask the advisor, store the reply
///
/// Exactly two messages are written per turn, in order, both under the
/// request's session. The advice call happens between the writes with no
/// store lock held, and cannot fail; at worst the reply is a canned
/// fallback.
pub async fn post_chat_message(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<ChatTurn>> {
    let request =
        ChatRequest::from_value(&body).map_err(|errors| AppError::invalid("message", errors))?;

    let user_message = state
        .store
        .create_chat_message(NewChatMessage {
            user_id: request.user_id.clone(),
            message: request.message.clone(),
            is_from_ai: false,
            session_id: request.session_id.clone(),
        })
        .await;

    let reply = state.advice.get_farming_advice(&request.message).await;

    let ai_message = state
        .store
        .create_chat_message(NewChatMessage {
            user_id: request.user_id,
            message: reply,
            is_from_ai: true,
            session_id: request.session_id,
        })
        .await;

    Ok(Json(ChatTurn {
        user_message,
        ai_message,
    }))
}
