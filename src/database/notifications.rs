use sqlx::Row;

use crate::{ApiError, ApiResult, Database, NotificationRecord};

fn row_to_notification(row: &sqlx::any::AnyRow) -> ApiResult<NotificationRecord> {
    let data_str: String = row.try_get("data")?;
    let data = serde_json::from_str(&data_str)
        .map_err(|e| ApiError::Internal(format!("Corrupt notification payload: {}", e)))?;

    Ok(NotificationRecord {
        id: row.try_get("id")?,
        notifiable_type: row.try_get("notifiable_type")?,
        notifiable_id: row.try_get("notifiable_id")?,
        kind: row.try_get("type")?,
        data,
        read_at: row.try_get("read_at").ok(),
        created_at: row.try_get("created_at")?,
    })
}

impl Database {
    pub async fn create_notification(&self, notification: &NotificationRecord) -> ApiResult<()> {
        let data = serde_json::to_string(&notification.data)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize payload: {}", e)))?;

        sqlx::query(
            "INSERT INTO notifications (id, notifiable_type, notifiable_id, type, data, read_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&notification.id)
        .bind(&notification.notifiable_type)
        .bind(&notification.notifiable_id)
        .bind(&notification.kind)
        .bind(&data)
        .bind(&notification.read_at)
        .bind(&notification.created_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    pub async fn get_notification_by_id(&self, id: &str) -> ApiResult<Option<NotificationRecord>> {
        let row = sqlx::query(
            "SELECT id, notifiable_type, notifiable_id, type, data, read_at, created_at
             FROM notifications
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_notification(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_notifications(
        &self,
        notifiable_type: &str,
        notifiable_id: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<NotificationRecord>> {
        let rows = sqlx::query(
            "SELECT id, notifiable_type, notifiable_id, type, data, read_at, created_at
             FROM notifications
             WHERE notifiable_type = ? AND notifiable_id = ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?",
        )
        .bind(notifiable_type)
        .bind(notifiable_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await?;

        let mut notifications = Vec::with_capacity(rows.len());
        for row in &rows {
            notifications.push(row_to_notification(row)?);
        }

        Ok(notifications)
    }

    /// Set `read_at`; the only mutation a notification supports
    pub async fn mark_notification_as_read(&self, id: &str) -> ApiResult<bool> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|e| ApiError::Internal(format!("Failed to format timestamp: {}", e)))?;

        let result = sqlx::query(
            "UPDATE notifications
             SET read_at = ?
             WHERE id = ? AND read_at IS NULL",
        )
        .bind(&now)
        .bind(id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_all_notifications_as_read(
        &self,
        notifiable_type: &str,
        notifiable_id: &str,
    ) -> ApiResult<i64> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|e| ApiError::Internal(format!("Failed to format timestamp: {}", e)))?;

        let result = sqlx::query(
            "UPDATE notifications
             SET read_at = ?
             WHERE notifiable_type = ? AND notifiable_id = ? AND read_at IS NULL",
        )
        .bind(&now)
        .bind(notifiable_type)
        .bind(notifiable_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() as i64)
    }

    pub async fn unread_count(
        &self,
        notifiable_type: &str,
        notifiable_id: &str,
    ) -> ApiResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count
             FROM notifications
             WHERE notifiable_type = ? AND notifiable_id = ? AND read_at IS NULL",
        )
        .bind(notifiable_type)
        .bind(notifiable_id)
        .fetch_one(self.pool())
        .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    /// Retention hook: delete notifications older than the cutoff
    pub async fn delete_old_notifications(&self, older_than_days: i64) -> ApiResult<i64> {
        let cutoff = time::OffsetDateTime::now_utc() - time::Duration::days(older_than_days);
        let cutoff_str = cutoff
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|e| ApiError::Internal(format!("Failed to format timestamp: {}", e)))?;

        let result = sqlx::query(
            "DELETE FROM notifications
             WHERE created_at < ?",
        )
        .bind(&cutoff_str)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() as i64)
    }
}
