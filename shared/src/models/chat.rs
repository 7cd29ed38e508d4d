//! Advice chat models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{parse_body, FieldError, FieldKind, FieldSpec};

/// One message in an advice conversation, human or assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub user_id: Option<String>,
    pub message: String,
    #[serde(rename = "isFromAI")]
    pub is_from_ai: bool,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for one stored message. Built server-side; both halves of
/// a chat turn go through this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    pub user_id: Option<String>,
    pub message: String,
    #[serde(rename = "isFromAI", default)]
    pub is_from_ai: bool,
    pub session_id: String,
}

/// Body of a chat-turn request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    pub user_id: Option<String>,
}

impl ChatRequest {
    pub const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::required("message", FieldKind::Text),
        FieldSpec::required("sessionId", FieldKind::Text),
        FieldSpec::optional("userId", FieldKind::Text),
    ];

    pub fn from_value(body: &Value) -> Result<Self, Vec<FieldError>> {
        parse_body(body, Self::SCHEMA)
    }
}

/// Response to a chat turn: the stored human message and the assistant
/// reply that answers it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub user_message: ChatMessage,
    pub ai_message: ChatMessage,
}
