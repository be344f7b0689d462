use relaydesk::events::{BroadcastDispatcher, ChannelDispatcher, RecordingDispatcher};
use relaydesk::models::NotificationRecord;
use relaydesk::services::NotificationService;
use serde_json::json;
use std::sync::Arc;

mod helpers;
use helpers::*;

#[tokio::test]
async fn test_creation_submits_exactly_one_event() {
    let db = setup_test_db().await;
    let user = create_test_user(&db, "Ada", "ada@example.com").await;

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let service = NotificationService::new(db.clone(), dispatcher.clone());

    let record = NotificationRecord::new(
        "user",
        user.id.clone(),
        "conversation.started",
        json!({"conversation_id": "conv_1"}),
    );
    let created = service.create(record).await.unwrap();

    let events = dispatcher.dispatched_events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].channel, user.id);
    assert_eq!(events[0].notification.id, created.id);

    // And the record is durable
    let stored = db.get_notification_by_id(&created.id).await.unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_unknown_recipient_creates_nothing() {
    let db = setup_test_db().await;

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let service = NotificationService::new(db.clone(), dispatcher.clone());

    let record = NotificationRecord::new("user", "missing", "ping", json!({}));
    let id = record.id.clone();

    let result = service.create(record).await;
    assert!(result.is_err());

    // No partial state: no record, no event
    assert!(db.get_notification_by_id(&id).await.unwrap().is_none());
    assert!(dispatcher.dispatched_events().await.is_empty());
}

#[tokio::test]
async fn test_unknown_notifiable_type_rejected() {
    let db = setup_test_db().await;
    let user = create_test_user(&db, "Ada", "ada@example.com").await;

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let service = NotificationService::new(db.clone(), dispatcher.clone());

    let record = NotificationRecord::new("team", user.id, "ping", json!({}));
    assert!(service.create(record).await.is_err());
    assert!(dispatcher.dispatched_events().await.is_empty());
}

#[tokio::test]
async fn test_event_visible_only_on_recipient_channel() {
    let db = setup_test_db().await;
    let recipient = create_test_user(&db, "FortyTwo", "u42@example.com").await;
    let bystander = create_test_user(&db, "FortyThree", "u43@example.com").await;

    let dispatcher = Arc::new(ChannelDispatcher::new(10));
    let mut on_recipient = dispatcher.subscribe(&recipient.id).await;
    let mut on_bystander = dispatcher.subscribe(&bystander.id).await;

    let service = NotificationService::new(db.clone(), dispatcher.clone());
    service
        .create(NotificationRecord::new(
            "user",
            recipient.id.clone(),
            "conversation.started",
            json!({}),
        ))
        .await
        .unwrap();

    let delivered = on_recipient.receiver.recv().await.unwrap();
    assert_eq!(delivered.channel, recipient.id);
    assert!(on_bystander.receiver.try_recv().is_err());
}

#[tokio::test]
async fn test_mark_as_read_does_not_publish() {
    let db = setup_test_db().await;
    let user = create_test_user(&db, "Ada", "ada@example.com").await;

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let service = NotificationService::new(db.clone(), dispatcher.clone());

    let created = service
        .create(NotificationRecord::new(
            "user",
            user.id.clone(),
            "ping",
            json!({}),
        ))
        .await
        .unwrap();

    let read = service.mark_as_read(&created.id).await.unwrap();
    assert!(read.read_at.is_some());

    // Only the creation event; read-state changes never publish
    assert_eq!(dispatcher.dispatched_events().await.len(), 1);
}

#[tokio::test]
async fn test_mark_as_read_is_idempotent() {
    let db = setup_test_db().await;
    let user = create_test_user(&db, "Ada", "ada@example.com").await;

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let service = NotificationService::new(db.clone(), dispatcher.clone());

    let created = service
        .create(NotificationRecord::new(
            "user",
            user.id.clone(),
            "ping",
            json!({}),
        ))
        .await
        .unwrap();

    let first = service.mark_as_read(&created.id).await.unwrap();
    let second = service.mark_as_read(&created.id).await.unwrap();
    assert_eq!(first.read_at, second.read_at);
}

#[tokio::test]
async fn test_unread_count_tracks_read_state() {
    let db = setup_test_db().await;
    let user = create_test_user(&db, "Ada", "ada@example.com").await;

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let service = NotificationService::new(db.clone(), dispatcher.clone());

    for _ in 0..3 {
        service
            .create(NotificationRecord::new(
                "user",
                user.id.clone(),
                "ping",
                json!({}),
            ))
            .await
            .unwrap();
    }

    assert_eq!(service.unread_count("user", &user.id).await.unwrap(), 3);

    let count = service.mark_all_as_read("user", &user.id).await.unwrap();
    assert_eq!(count, 3);
    assert_eq!(service.unread_count("user", &user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let db = setup_test_db().await;
    let user = create_test_user(&db, "Ada", "ada@example.com").await;

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let service = NotificationService::new(db.clone(), dispatcher.clone());

    for n in 0..3 {
        let mut record =
            NotificationRecord::new("user", user.id.clone(), "ping", json!({"n": n}));
        // Distinct timestamps so ordering is observable
        record.created_at = format!("2026-08-0{}T00:00:00Z", n + 1);
        service.create(record).await.unwrap();
    }

    let listed = service.list("user", &user.id, 50, 0).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].data["n"], 2);
    assert_eq!(listed[2].data["n"], 0);
}

#[tokio::test]
async fn test_retention_deletes_only_old_notifications() {
    let db = setup_test_db().await;
    let user = create_test_user(&db, "Ada", "ada@example.com").await;

    let mut old = NotificationRecord::new("user", user.id.clone(), "ping", json!({}));
    old.created_at = "2020-01-01T00:00:00Z".to_string();
    db.create_notification(&old).await.unwrap();

    let fresh = NotificationRecord::new("user", user.id.clone(), "ping", json!({}));
    db.create_notification(&fresh).await.unwrap();

    let deleted = db.delete_old_notifications(90).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(db.get_notification_by_id(&old.id).await.unwrap().is_none());
    assert!(db.get_notification_by_id(&fresh.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_start_conversation_drives_pipeline_end_to_end() {
    let app = setup_test_app().await;
    let sender = create_test_user(&app.db, "Ada", "ada@example.com").await;
    let recipient = create_test_user(&app.db, "Grace", "grace@example.com").await;

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/conversations",
        Some(serde_json::json!({
            "recipient_id": recipient.id,
            "sender_id": sender.id,
            "message": "Hello there",
        })),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["recipient_id"], recipient.id.as_str());

    let events = app.dispatcher.dispatched_events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].channel, recipient.id);
    assert_eq!(events[0].notification.kind, "conversation.started");
    assert_eq!(
        events[0].notification.data["conversation_id"],
        body["id"]
    );

    // The conversation is durable and readable back
    let (status, fetched) = send_json(
        &app.router,
        "GET",
        &format!("/api/conversations/{}", body["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(fetched["message"], "Hello there");

    let stored_sender = app.db.get_user_by_id(&sender.id).await.unwrap().unwrap();
    assert_eq!(stored_sender.email, "ada@example.com");
}

#[tokio::test]
async fn test_prune_expired_honors_retention_window() {
    let db = setup_test_db().await;
    let user = create_test_user(&db, "Ada", "ada@example.com").await;

    let dispatcher = Arc::new(RecordingDispatcher::new());
    let service = NotificationService::new(db.clone(), dispatcher);

    let mut old = NotificationRecord::new("user", user.id.clone(), "ping", json!({}));
    old.created_at = "2020-01-01T00:00:00Z".to_string();
    db.create_notification(&old).await.unwrap();

    let fresh = NotificationRecord::new("user", user.id.clone(), "ping", json!({}));
    db.create_notification(&fresh).await.unwrap();

    assert_eq!(service.prune_expired(90).await.unwrap(), 1);
    assert!(db.get_notification_by_id(&old.id).await.unwrap().is_none());
    assert!(db.get_notification_by_id(&fresh.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_list_response_reports_page_count() {
    let app = setup_test_app().await;
    let user = create_test_user(&app.db, "Ada", "ada@example.com").await;

    for _ in 0..3 {
        let record = NotificationRecord::new("user", user.id.clone(), "ping", json!({}));
        app.db.create_notification(&record).await.unwrap();
    }

    let (status, body) = send_json(
        &app.router,
        "GET",
        &format!("/api/notifications?notifiable_id={}&limit=2", user.id),
        None,
    )
    .await;

    assert_eq!(status, 200);
    // count is the page size, not an overall row count
    assert_eq!(body["count"], 2);
    assert_eq!(body["notifications"].as_array().unwrap().len(), 2);
}
