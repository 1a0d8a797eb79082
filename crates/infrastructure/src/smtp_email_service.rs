//! SMTP email service using the `lettre` crate.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use portfolio_application::{EmailService, OutboundEmail};
use portfolio_core::{AppError, AppResult};

/// SMTP email service configuration.
#[derive(Clone)]
pub struct SmtpEmailConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// SMTP username.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Upper bound for one send, in seconds.
    pub timeout_seconds: u64,
}

/// Email service relaying through an authenticated SMTP server.
#[derive(Clone)]
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    /// Creates a new SMTP email service.
    pub fn new(config: SmtpEmailConfig) -> AppResult<Self> {
        let credentials = Credentials::new(config.username, config.password);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|error| {
                AppError::Validation(format!("failed to create SMTP transport: {error}"))
            })?
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(std::time::Duration::from_secs(config.timeout_seconds)))
            .build();

        Ok(Self { transport })
    }
}

fn parse_mailbox(value: &str, role: &str) -> AppResult<Mailbox> {
    value
        .parse()
        .map_err(|error| AppError::DeliveryFailed(format!("invalid {role} address: {error}")))
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(&self, email: &OutboundEmail) -> AppResult<()> {
        let message = Message::builder()
            .from(parse_mailbox(&email.from, "sender")?)
            .to(parse_mailbox(&email.to, "recipient")?)
            .reply_to(parse_mailbox(&email.reply_to, "reply-to")?)
            .subject(email.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|error| AppError::DeliveryFailed(format!("failed to build email: {error}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|error| AppError::DeliveryFailed(format!("failed to send email: {error}")))?;

        Ok(())
    }
}
