//! Email service backed by the Resend HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use portfolio_application::{EmailService, OutboundEmail};
use portfolio_core::{AppError, AppResult};
use serde::Serialize;

/// Public Resend API endpoint.
pub const RESEND_API_URL: &str = "https://api.resend.com";

/// Resend API client configuration.
#[derive(Clone)]
pub struct ResendEmailConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Base URL of the API, without trailing slash.
    pub base_url: String,
    /// Upper bound for one send, in seconds.
    pub timeout_seconds: u64,
}

/// Email service posting messages to the Resend `/emails` endpoint.
#[derive(Clone)]
pub struct ResendEmailService {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ResendEmailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl ResendEmailService {
    /// Creates a new Resend email service.
    pub fn new(config: ResendEmailConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/emails", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl EmailService for ResendEmailService {
    async fn send_email(&self, email: &OutboundEmail) -> AppResult<()> {
        let payload = ResendEmailPayload {
            from: &email.from,
            to: [email.to.as_str()],
            reply_to: &email.reply_to,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                AppError::DeliveryFailed(format!("email provider transport error: {error}"))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());
        Err(AppError::DeliveryFailed(format!(
            "email provider rejected message with status {status}: {body}"
        )))
    }
}
