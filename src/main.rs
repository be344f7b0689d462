use relaydesk::api::middleware::AppState;
use relaydesk::api::router::build_router;
use relaydesk::config::Config;
use relaydesk::database::Database;
use relaydesk::events::ChannelDispatcher;
use relaydesk::services::{MailService, MailTransport, RecordingMailTransport, SmtpConfig, SmtpMailTransport};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relaydesk=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded for {}", config.service_name);

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    db.init_schema().await?;
    tracing::info!("Database schema applied");

    // Real-time delivery pathway
    let dispatcher = Arc::new(ChannelDispatcher::new(config.subscriber_queue_depth));

    // Mail transport: SMTP when configured, otherwise a recording no-op
    let mail_transport: Arc<dyn MailTransport> = match SmtpConfig::from_env() {
        Ok(smtp) => Arc::new(SmtpMailTransport::new(smtp)),
        Err(e) => {
            tracing::warn!("SMTP not configured ({}), mail will not be delivered", e);
            Arc::new(RecordingMailTransport::new())
        }
    };
    let mail_service = MailService::new(mail_transport);

    let state = AppState::new(db, dispatcher, mail_service);

    // Daily retention sweep for old notifications
    let retention_service = state.notification_service.clone();
    let retention_days = config.notification_retention_days;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(24 * 60 * 60));
        loop {
            interval.tick().await;
            match retention_service.prune_expired(retention_days).await {
                Ok(deleted) if deleted > 0 => {
                    tracing::info!("Retention sweep removed {} notifications", deleted)
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Retention sweep failed: {}", e),
            }
        }
    });

    // Build router
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
