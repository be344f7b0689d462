use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conversation entity created when one user starts a conversation with another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    pub recipient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: String, // ISO 8601 timestamp
}

impl Conversation {
    pub fn new(sender_id: Option<String>, recipient_id: String, message: Option<String>) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            sender_id,
            recipient_id,
            message,
            created_at: now,
        }
    }
}
