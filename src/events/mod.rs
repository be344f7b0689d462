use crate::api::middleware::error::{ApiError, ApiResult};
use crate::models::NotificationRecord;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

/// Domain event describing "a notification was created for recipient X".
///
/// Transient: constructed right after the record is persisted, handed to the
/// dispatcher and discarded. Never emitted for updates or deletes.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationCreated {
    pub channel: String,
    pub notification: NotificationRecord,
}

impl NotificationCreated {
    /// Build the event for a persisted record; the delivery channel is scoped
    /// by the recipient id.
    pub fn for_record(record: &NotificationRecord) -> ApiResult<Self> {
        if record.notifiable_id.trim().is_empty() {
            return Err(ApiError::Internal(
                "Notification record has no recipient id".to_string(),
            ));
        }

        Ok(Self {
            channel: record.notifiable_id.clone(),
            notification: record.clone(),
        })
    }
}

/// One listener's handle on a broadcast channel
pub struct Subscription {
    pub id: String,
    pub channel: String,
    pub receiver: mpsc::Receiver<NotificationCreated>,
}

/// Real-time delivery contract: accept-and-forget submission of domain
/// events to a named channel, best-effort at-least-once to the listeners
/// subscribed at delivery time. No acknowledgement is returned.
#[async_trait]
pub trait BroadcastDispatcher: Send + Sync {
    /// Register a listener on a channel
    async fn subscribe(&self, channel: &str) -> Subscription;

    /// Drop a listener registration
    async fn unsubscribe(&self, channel: &str, subscription_id: &str);

    /// Submit an event for asynchronous delivery. Returns as soon as the
    /// event is queued; a channel with no listeners is still a success.
    async fn dispatch(&self, event: NotificationCreated) -> ApiResult<()>;

    /// Number of live listeners on a channel
    async fn subscriber_count(&self, channel: &str) -> usize;
}

type ChannelMap = HashMap<String, Vec<(String, mpsc::Sender<NotificationCreated>)>>;

/// In-memory dispatcher keyed by channel name.
///
/// Each subscriber gets a bounded queue; dispatch uses `try_send` so the
/// submitting request task never blocks on a slow listener.
pub struct ChannelDispatcher {
    channels: Arc<Mutex<ChannelMap>>,
    queue_depth: usize,
}

impl ChannelDispatcher {
    pub fn new(queue_depth: usize) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            queue_depth,
        }
    }
}

impl Default for ChannelDispatcher {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl BroadcastDispatcher for ChannelDispatcher {
    async fn subscribe(&self, channel: &str) -> Subscription {
        let (tx, rx) = mpsc::channel(self.queue_depth);
        let id = Uuid::new_v4().to_string();

        let mut channels = self.channels.lock().await;
        channels
            .entry(channel.to_string())
            .or_default()
            .push((id.clone(), tx));

        Subscription {
            id,
            channel: channel.to_string(),
            receiver: rx,
        }
    }

    async fn unsubscribe(&self, channel: &str, subscription_id: &str) {
        let mut channels = self.channels.lock().await;
        if let Some(subscribers) = channels.get_mut(channel) {
            subscribers.retain(|(id, _)| id != subscription_id);
            if subscribers.is_empty() {
                channels.remove(channel);
            }
        }
    }

    async fn dispatch(&self, event: NotificationCreated) -> ApiResult<()> {
        let mut channels = self.channels.lock().await;

        let Some(subscribers) = channels.get_mut(&event.channel) else {
            tracing::debug!("No subscribers on channel {}", event.channel);
            return Ok(());
        };

        // Drop closed listeners; skip full queues (best effort)
        subscribers.retain(|(id, tx)| {
            if tx.is_closed() {
                return false;
            }
            if let Err(e) = tx.try_send(event.clone()) {
                tracing::debug!(
                    "Skipping subscriber {} on channel {}: {}",
                    id,
                    event.channel,
                    e
                );
            }
            true
        });

        if subscribers.is_empty() {
            channels.remove(&event.channel);
        }

        Ok(())
    }

    async fn subscriber_count(&self, channel: &str) -> usize {
        let channels = self.channels.lock().await;
        channels.get(channel).map_or(0, |subs| subs.len())
    }
}

/// Test dispatcher recording every dispatched event instead of delivering it
pub struct RecordingDispatcher {
    dispatched: Arc<Mutex<Vec<NotificationCreated>>>,
    subscribers: Arc<Mutex<Vec<mpsc::Sender<NotificationCreated>>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self {
            dispatched: Arc::new(Mutex::new(Vec::new())),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn dispatched_events(&self) -> Vec<NotificationCreated> {
        self.dispatched.lock().await.clone()
    }
}

impl Default for RecordingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BroadcastDispatcher for RecordingDispatcher {
    async fn subscribe(&self, channel: &str) -> Subscription {
        let (tx, rx) = mpsc::channel(100);
        self.subscribers.lock().await.push(tx);

        Subscription {
            id: Uuid::new_v4().to_string(),
            channel: channel.to_string(),
            receiver: rx,
        }
    }

    async fn unsubscribe(&self, _channel: &str, _subscription_id: &str) {}

    async fn dispatch(&self, event: NotificationCreated) -> ApiResult<()> {
        self.dispatched.lock().await.push(event);
        Ok(())
    }

    async fn subscriber_count(&self, _channel: &str) -> usize {
        self.subscribers.lock().await.len()
    }
}
