use sqlx::Row;

use crate::{ApiResult, Conversation, Database};

impl Database {
    pub async fn create_conversation(&self, conversation: &Conversation) -> ApiResult<()> {
        sqlx::query(
            "INSERT INTO conversations (id, sender_id, recipient_id, message, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&conversation.id)
        .bind(&conversation.sender_id)
        .bind(&conversation.recipient_id)
        .bind(&conversation.message)
        .bind(&conversation.created_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    pub async fn get_conversation_by_id(&self, id: &str) -> ApiResult<Option<Conversation>> {
        let row = sqlx::query(
            "SELECT id, sender_id, recipient_id, message, created_at
             FROM conversations
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => Ok(Some(Conversation {
                id: row.try_get("id")?,
                sender_id: row.try_get("sender_id").ok(),
                recipient_id: row.try_get("recipient_id")?,
                message: row.try_get("message").ok(),
                created_at: row.try_get("created_at")?,
            })),
            None => Ok(None),
        }
    }
}
