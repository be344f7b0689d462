use axum::Router;
use relaydesk::api::middleware::AppState;
use relaydesk::api::router::build_router;
use relaydesk::database::Database;
use relaydesk::events::RecordingDispatcher;
use relaydesk::models::{PaymentMethod, Role, User};
use relaydesk::services::{MailService, RecordingMailTransport};
use std::sync::Arc;
use uuid::Uuid;

pub async fn setup_test_db() -> Database {
    // Install drivers for AnyPool (required for tests)
    sqlx::any::install_default_drivers();

    // Use file-based SQLite for tests (unique UUID per test for parallel execution)
    let temp_file = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", temp_file);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    db.init_schema().await.expect("Failed to apply schema");

    db
}

/// Router + database + recording dispatcher/mail doubles for endpoint tests
pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub dispatcher: Arc<RecordingDispatcher>,
    pub mail: Arc<RecordingMailTransport>,
}

pub async fn setup_test_app() -> TestApp {
    let db = setup_test_db().await;
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let mail = Arc::new(RecordingMailTransport::new());
    let mail_service = MailService::new(mail.clone());

    let state = AppState::new(db.clone(), dispatcher.clone(), mail_service);

    TestApp {
        router: build_router(state),
        db,
        dispatcher,
        mail,
    }
}

pub async fn create_test_user(db: &Database, name: &str, email: &str) -> User {
    let user = User::new(name.to_string(), email.to_string());
    db.create_user(&user).await.expect("Failed to create user");
    user
}

pub async fn create_test_role(db: &Database, name: &str) -> Role {
    let role = Role::new(name.to_string());
    db.create_role(&role).await.expect("Failed to create role");
    role
}

pub async fn create_test_payment_method(db: &Database, name: &str, slug: &str) -> PaymentMethod {
    let method = PaymentMethod::new(name.to_string(), slug.to_string());
    db.create_payment_method(&method)
        .await
        .expect("Failed to create payment method");
    method
}
