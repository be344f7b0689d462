use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::middleware::{ApiError, ApiResult, AppState, Json},
    models::{Conversation, NotificationRecord},
    shared::validation::Validator,
};

const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Debug, Deserialize)]
pub struct StartConversationRequest {
    pub recipient_id: Option<String>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Start a conversation with another user.
///
/// Persists the conversation, then creates a notification for the recipient,
/// which drives the broadcast pipeline.
pub async fn start_conversation(
    State(state): State<AppState>,
    Json(request): Json<StartConversationRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut v = Validator::new();

    let recipient_id = request.recipient_id.as_deref().unwrap_or("").trim();
    if recipient_id.is_empty() {
        v.add_error("recipient_id", "The recipient_id field is required.");
    } else if !state.db.user_exists(recipient_id).await? {
        v.add_error("recipient_id", "The selected recipient_id is invalid.");
    }

    if let Some(sender_id) = request.sender_id.as_deref() {
        if !state.db.user_exists(sender_id).await? {
            v.add_error("sender_id", "The selected sender_id is invalid.");
        }
    }

    if let Some(message) = &request.message {
        v.max_len(
            "message",
            message,
            MAX_MESSAGE_CHARS,
            "The message may not be greater than 5000 characters.",
        );
    }

    v.finish("The given data was invalid.")?;

    let conversation = Conversation::new(
        request.sender_id.clone(),
        recipient_id.to_string(),
        request.message.clone(),
    );
    state.db.create_conversation(&conversation).await?;

    let notification = NotificationRecord::new(
        "user",
        recipient_id,
        "conversation.started",
        json!({
            "conversation_id": conversation.id,
            "sender_id": conversation.sender_id,
            "message": conversation.message,
        }),
    );
    state.notification_service.create(notification).await?;

    Ok(Json(conversation))
}

/// Fetch a conversation by id
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let conversation = state
        .db
        .get_conversation_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Conversation not found".to_string()))?;

    Ok(Json(conversation))
}
