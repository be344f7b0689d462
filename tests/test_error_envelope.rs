use axum::http::StatusCode;

mod helpers;
use helpers::*;

#[tokio::test]
async fn test_not_found_renders_envelope_without_errors_key() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/notifications/does-not-exist/read",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Notification not found");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_validation_failure_renders_field_errors() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/api/conversations",
        Some(serde_json::json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "The given data was invalid.");
    assert_eq!(
        body["errors"]["recipient_id"][0],
        "The recipient_id field is required."
    );
}

#[tokio::test]
async fn test_bad_request_renders_envelope() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app.router,
        "GET",
        "/api/notifications?notifiable_id=u1&limit=0",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Limit must be between 1 and 100");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_success_payload_never_carries_envelope_fields() {
    let app = setup_test_app().await;
    let user = create_test_user(&app.db, "Ada", "ada@example.com").await;

    let (status, body) = send_json(
        &app.router,
        "GET",
        &format!("/api/notifications/unread-count?notifiable_id={}", user.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert!(body.get("success").is_none());
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_malformed_json_body_renders_envelope() {
    let app = setup_test_app().await;

    let (status, body) = send_raw(&app.router, "POST", "/api/conversations", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("JSON"));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_missing_query_parameter_renders_envelope() {
    let app = setup_test_app().await;

    let (status, body) = send_json(&app.router, "GET", "/api/notifications", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("notifiable_id"));
}

#[tokio::test]
async fn test_unknown_address_owner_type_is_bad_request() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app.router,
        "PUT",
        "/api/addresses/starship/s1",
        Some(serde_json::json!({
            "line1": "1 Main St",
            "city": "Springfield",
            "country": "US",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unknown address owner type: starship");
}
