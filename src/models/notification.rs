use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// NotificationRecord entity representing one notification owed to a recipient.
///
/// The recipient is addressed polymorphically through the
/// (`notifiable_type`, `notifiable_id`) pair. After creation the only
/// permitted mutation is setting `read_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    pub notifiable_type: String,
    pub notifiable_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<String>,
    pub created_at: String, // ISO 8601 timestamp
}

impl NotificationRecord {
    /// Create a new unread notification for a recipient
    pub fn new(
        notifiable_type: impl Into<String>,
        notifiable_id: impl Into<String>,
        kind: impl Into<String>,
        data: Value,
    ) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            notifiable_type: notifiable_type.into(),
            notifiable_id: notifiable_id.into(),
            kind: kind.into(),
            data,
            read_at: None,
            created_at: now,
        }
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Validate required addressing fields
    pub fn validate(&self) -> Result<(), String> {
        if self.notifiable_type.trim().is_empty() {
            return Err("Notification must have a notifiable_type".to_string());
        }
        if self.notifiable_id.trim().is_empty() {
            return Err("Notification must have a notifiable_id".to_string());
        }
        if self.kind.trim().is_empty() {
            return Err("Notification must have a type".to_string());
        }
        Ok(())
    }
}
