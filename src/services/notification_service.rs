use std::sync::Arc;

use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::events::BroadcastDispatcher;
use crate::models::NotificationRecord;
use crate::services::observer::NotificationObserver;

/// Notification kinds addressed through the users table
const USER_NOTIFIABLE_TYPE: &str = "user";

#[derive(Clone)]
pub struct NotificationService {
    db: Database,
    observer: Arc<NotificationObserver>,
}

impl NotificationService {
    pub fn new(db: Database, dispatcher: Arc<dyn BroadcastDispatcher>) -> Self {
        Self {
            db,
            observer: Arc::new(NotificationObserver::new(dispatcher)),
        }
    }

    /// Single commit point for notification creation.
    ///
    /// Validates the record and its recipient, persists it, then fires the
    /// observer exactly once post-insert. Updates and deletes never publish.
    pub async fn create(&self, record: NotificationRecord) -> ApiResult<NotificationRecord> {
        record.validate().map_err(ApiError::BadRequest)?;
        self.ensure_recipient_exists(&record).await?;

        self.db.create_notification(&record).await?;
        self.observer.on_created(&record).await?;

        Ok(record)
    }

    async fn ensure_recipient_exists(&self, record: &NotificationRecord) -> ApiResult<()> {
        match record.notifiable_type.as_str() {
            USER_NOTIFIABLE_TYPE => {
                if !self.db.user_exists(&record.notifiable_id).await? {
                    return Err(ApiError::NotFound(format!(
                        "Recipient user {} not found",
                        record.notifiable_id
                    )));
                }
                Ok(())
            }
            other => Err(ApiError::BadRequest(format!(
                "Unknown notifiable type: {}",
                other
            ))),
        }
    }

    pub async fn list(
        &self,
        notifiable_type: &str,
        notifiable_id: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<Vec<NotificationRecord>> {
        self.db
            .list_notifications(notifiable_type, notifiable_id, limit, offset)
            .await
    }

    pub async fn unread_count(
        &self,
        notifiable_type: &str,
        notifiable_id: &str,
    ) -> ApiResult<i64> {
        self.db.unread_count(notifiable_type, notifiable_id).await
    }

    pub async fn mark_as_read(&self, id: &str) -> ApiResult<NotificationRecord> {
        let notification = self
            .db
            .get_notification_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))?;

        if notification.is_read() {
            return Ok(notification);
        }

        self.db.mark_notification_as_read(id).await?;

        self.db
            .get_notification_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))
    }

    /// Delete notifications older than the retention window. Returns the
    /// number of rows removed.
    pub async fn prune_expired(&self, retention_days: i64) -> ApiResult<i64> {
        self.db.delete_old_notifications(retention_days).await
    }

    pub async fn mark_all_as_read(
        &self,
        notifiable_type: &str,
        notifiable_id: &str,
    ) -> ApiResult<i64> {
        self.db
            .mark_all_notifications_as_read(notifiable_type, notifiable_id)
            .await
    }
}
