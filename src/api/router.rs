use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api;
use crate::api::middleware::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/notifications",
            get(api::notifications::list_notifications),
        )
        .route(
            "/api/notifications/unread-count",
            get(api::notifications::get_unread_count),
        )
        .route(
            "/api/notifications/stream",
            get(api::notifications::notification_stream),
        )
        .route(
            "/api/notifications/:id/read",
            post(api::notifications::mark_notification_as_read),
        )
        .route(
            "/api/notifications/read-all",
            post(api::notifications::mark_all_notifications_as_read),
        )
        .route(
            "/api/conversations",
            post(api::conversations::start_conversation),
        )
        .route(
            "/api/conversations/:id",
            get(api::conversations::get_conversation),
        )
        .route(
            "/api/payment-methods/:id",
            patch(api::payment_methods::update_payment_method),
        )
        .route("/api/users/:id/roles", put(api::roles::sync_roles))
        .route(
            "/api/addresses/:owner_type/:owner_id",
            put(api::addresses::upsert_address).get(api::addresses::get_address),
        )
        .route("/api/mail/otp", post(api::mail::send_otp_mail))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
