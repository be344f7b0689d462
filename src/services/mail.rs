//! OTP mail trigger: renders the one-time-password message and hands it to
//! an SMTP transport. Delivery guarantees belong to the mail subsystem.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};
use rand::Rng;
use std::env;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Failed to build mail message: {0}")]
    MessageBuild(String),

    #[error("Failed to send mail: {0}")]
    Send(String),

    #[error("SMTP configuration error: {0}")]
    Config(String),
}

/// SMTP configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
}

impl SmtpConfig {
    pub fn from_env() -> Result<Self, MailError> {
        let host = env::var("SMTP_HOST")
            .map_err(|_| MailError::Config("SMTP_HOST not set".to_string()))?;

        let port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| MailError::Config("Invalid SMTP_PORT".to_string()))?;

        let username = env::var("SMTP_USERNAME")
            .map_err(|_| MailError::Config("SMTP_USERNAME not set".to_string()))?;

        let password = env::var("SMTP_PASSWORD")
            .map_err(|_| MailError::Config("SMTP_PASSWORD not set".to_string()))?;

        let from_email = env::var("SMTP_FROM_EMAIL")
            .map_err(|_| MailError::Config("SMTP_FROM_EMAIL not set".to_string()))?;

        let from_name = env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Relaydesk".to_string());

        Ok(Self {
            host,
            port,
            username,
            password,
            from_email,
            from_name,
        })
    }
}

/// One-time-password mail content
#[derive(Debug, Clone)]
pub struct OtpMail {
    pub otp: String,
    pub user_name: String,
}

impl OtpMail {
    pub const EXPIRY_MINUTES: u32 = 10;

    pub fn subject(&self) -> String {
        "Your verification code".to_string()
    }

    pub fn render(&self) -> String {
        format!(
            "Hello {},\n\n\
             Your verification code is: {}\n\n\
             This code is valid for {} minutes. If you did not request it, you\n\
             can safely ignore this message.\n",
            self.user_name,
            self.otp,
            Self::EXPIRY_MINUTES
        )
    }
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// SMTP transport backed by lettre
pub struct SmtpMailTransport {
    config: SmtpConfig,
}

impl SmtpMailTransport {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let message = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| MailError::MessageBuild(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| MailError::MessageBuild(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| MailError::MessageBuild(e.to_string()))?;

        let credentials =
            Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer = SmtpTransport::relay(&self.config.host)
            .map_err(|e| MailError::Config(e.to_string()))?
            .port(self.config.port)
            .credentials(credentials)
            .build();

        mailer
            .send(&message)
            .map_err(|e| MailError::Send(e.to_string()))?;

        Ok(())
    }
}

/// Test transport recording sent mail instead of delivering it
pub struct RecordingMailTransport {
    sent: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl RecordingMailTransport {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// (to, subject, body) triples in send order
    pub async fn sent_mail(&self) -> Vec<(String, String, String)> {
        self.sent.lock().await.clone()
    }
}

impl Default for RecordingMailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .await
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

#[derive(Clone)]
pub struct MailService {
    transport: Arc<dyn MailTransport>,
}

impl MailService {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Six-digit numeric code, zero-padded
    pub fn generate_otp() -> String {
        let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    pub async fn send_otp(&self, to: &str, user_name: &str, otp: &str) -> Result<(), MailError> {
        let mail = OtpMail {
            otp: otp.to_string(),
            user_name: user_name.to_string(),
        };

        tracing::info!("Sending OTP mail to {}", to);
        self.transport
            .send(to, &mail.subject(), &mail.render())
            .await
    }
}
