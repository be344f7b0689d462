use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt as _;

use crate::{
    api::middleware::{ApiError, ApiResult, AppState, Json, Query},
    models::NotificationRecord,
};

// Request DTOs

fn default_notifiable_type() -> String {
    "user".to_string()
}

#[derive(Debug, Deserialize)]
pub struct RecipientQuery {
    #[serde(default = "default_notifiable_type")]
    pub notifiable_type: String,
    pub notifiable_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListNotificationsQuery {
    #[serde(default = "default_notifiable_type")]
    pub notifiable_type: String,
    pub notifiable_id: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationRecord>,
    /// Number of records in this page, not an overall row count
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub message: String,
    pub count: i64,
}

// API Handlers

/// List notifications for a recipient
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> ApiResult<impl IntoResponse> {
    if query.limit < 1 || query.limit > 100 {
        return Err(ApiError::BadRequest(
            "Limit must be between 1 and 100".to_string(),
        ));
    }

    if query.offset < 0 {
        return Err(ApiError::BadRequest(
            "Offset must be non-negative".to_string(),
        ));
    }

    let notifications = state
        .notification_service
        .list(
            &query.notifiable_type,
            &query.notifiable_id,
            query.limit,
            query.offset,
        )
        .await?;

    let count = notifications.len() as i64;

    Ok(Json(NotificationListResponse {
        notifications,
        count,
    }))
}

/// Get unread notification count for a recipient
pub async fn get_unread_count(
    State(state): State<AppState>,
    Query(query): Query<RecipientQuery>,
) -> ApiResult<impl IntoResponse> {
    let count = state
        .notification_service
        .unread_count(&query.notifiable_type, &query.notifiable_id)
        .await?;

    Ok(Json(UnreadCountResponse { count }))
}

/// SSE endpoint streaming NotificationCreated events for one recipient.
///
/// The channel is scoped by recipient id; a subscriber on channel 42 never
/// sees events addressed to 43.
pub async fn notification_stream(
    State(state): State<AppState>,
    Query(query): Query<RecipientQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = state.dispatcher.subscribe(&query.notifiable_id).await;

    tracing::info!(
        "SSE connection established on channel {} (subscription {})",
        subscription.channel,
        subscription.id
    );

    let stream = ReceiverStream::new(subscription.receiver).map(|event| {
        // Wire payload is the serialized NotificationRecord
        let json_data = serde_json::to_string(&event.notification).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize notification event: {}", e);
            "{}".to_string()
        });

        Ok(Event::default().event("notification").data(json_data))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Mark a notification as read
pub async fn mark_notification_as_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let notification = state.notification_service.mark_as_read(&id).await?;
    Ok(Json(notification))
}

/// Mark all of a recipient's notifications as read
pub async fn mark_all_notifications_as_read(
    State(state): State<AppState>,
    Query(query): Query<RecipientQuery>,
) -> ApiResult<impl IntoResponse> {
    let count = state
        .notification_service
        .mark_all_as_read(&query.notifiable_type, &query.notifiable_id)
        .await?;

    Ok(Json(MarkAllReadResponse {
        message: "All notifications marked as read".to_string(),
        count,
    }))
}
