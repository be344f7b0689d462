use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub subscriber_queue_depth: usize,
    pub notification_retention_days: i64,
    pub service_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://relaydesk.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let subscriber_queue_depth = env::var("SUBSCRIBER_QUEUE_DEPTH")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .unwrap_or(100);

        let notification_retention_days = env::var("NOTIFICATION_RETENTION_DAYS")
            .unwrap_or_else(|_| "90".to_string())
            .parse()
            .unwrap_or(90);

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "relaydesk".to_string());

        Ok(Config {
            database_url,
            server_host,
            server_port,
            subscriber_queue_depth,
            notification_retention_days,
            service_name,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
}
