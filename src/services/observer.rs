use std::sync::Arc;

use crate::api::middleware::error::ApiResult;
use crate::events::{BroadcastDispatcher, NotificationCreated};
use crate::models::NotificationRecord;

/// Bridges "a NotificationRecord was persisted" to "an event is published".
///
/// Invoked exactly once per record, at the single commit point in
/// `NotificationService::create`, never from implicit lifecycle hooks. The
/// dispatcher is injected so the publish path stays testable.
pub struct NotificationObserver {
    dispatcher: Arc<dyn BroadcastDispatcher>,
}

impl NotificationObserver {
    pub fn new(dispatcher: Arc<dyn BroadcastDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Construct the domain event and hand it off. Does not block on
    /// delivery; errors from event construction propagate to the caller.
    pub async fn on_created(&self, record: &NotificationRecord) -> ApiResult<()> {
        let event = NotificationCreated::for_record(record)?;

        tracing::debug!(
            "Publishing NotificationCreated for notification {} on channel {}",
            record.id,
            event.channel
        );

        self.dispatcher.dispatch(event).await
    }
}
