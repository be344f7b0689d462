use axum::http::StatusCode;
use serde_json::json;

mod helpers;
use helpers::*;

#[tokio::test]
async fn test_upsert_then_get() {
    let app = setup_test_app().await;
    let user = create_test_user(&app.db, "Ada", "ada@example.com").await;

    let (status, body) = send_json(
        &app.router,
        "PUT",
        &format!("/api/addresses/user/{}", user.id),
        Some(json!({
            "line1": "1 Main St",
            "city": "Springfield",
            "country": "US",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner_type"], "user");
    assert_eq!(body["owner_id"], user.id.as_str());

    let (status, body) = send_json(
        &app.router,
        "GET",
        &format!("/api/addresses/user/{}", user.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["line1"], "1 Main St");
}

#[tokio::test]
async fn test_upsert_replaces_in_place() {
    let app = setup_test_app().await;
    let user = create_test_user(&app.db, "Ada", "ada@example.com").await;

    let (_, first) = send_json(
        &app.router,
        "PUT",
        &format!("/api/addresses/user/{}", user.id),
        Some(json!({"line1": "1 Main St", "city": "Springfield", "country": "US"})),
    )
    .await;

    let (status, second) = send_json(
        &app.router,
        "PUT",
        &format!("/api/addresses/user/{}", user.id),
        Some(json!({"line1": "2 Side St", "city": "Shelbyville", "country": "US"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Same row, updated fields
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["line1"], "2 Side St");

    let stored = app.db.get_address("user", &user.id).await.unwrap().unwrap();
    assert_eq!(stored.city, "Shelbyville");
}

#[tokio::test]
async fn test_required_fields() {
    let app = setup_test_app().await;
    let user = create_test_user(&app.db, "Ada", "ada@example.com").await;

    let (status, body) = send_json(
        &app.router,
        "PUT",
        &format!("/api/addresses/user/{}", user.id),
        Some(json!({"line2": "Apt 2"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["line1"][0], "The line1 field is required.");
    assert_eq!(body["errors"]["city"][0], "The city field is required.");
    assert_eq!(body["errors"]["country"][0], "The country field is required.");
}

#[tokio::test]
async fn test_unknown_owner_is_not_found() {
    let app = setup_test_app().await;

    let (status, _) = send_json(
        &app.router,
        "PUT",
        "/api/addresses/user/ghost",
        Some(json!({"line1": "1 Main St", "city": "Springfield", "country": "US"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_payment_method_owner_and_typed_lookup() {
    let app = setup_test_app().await;
    let method = create_test_payment_method(&app.db, "Cash", "cash").await;

    let (status, _) = send_json(
        &app.router,
        "PUT",
        &format!("/api/addresses/payment_method/{}", method.id),
        Some(json!({"line1": "9 Bank Row", "city": "Springfield", "country": "US"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // HasAddress-typed lookup resolves the same row
    let address = app.db.address_for(&method).await.unwrap().unwrap();
    assert_eq!(address.line1, "9 Bank Row");
    assert_eq!(address.owner_type, "payment_method");

    let missing_owner = create_test_user(&app.db, "Ada", "ada@example.com").await;
    assert!(app.db.address_for(&missing_owner).await.unwrap().is_none());
}
