//! Console email service for development. Logs emails to tracing output.

use async_trait::async_trait;
use portfolio_application::{EmailService, OutboundEmail};
use portfolio_core::AppResult;
use tracing::info;

/// Development email service that logs emails to the console.
#[derive(Clone)]
pub struct ConsoleEmailService;

impl ConsoleEmailService {
    /// Creates a new console email service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for ConsoleEmailService {
    async fn send_email(&self, email: &OutboundEmail) -> AppResult<()> {
        info!(
            to = %email.to,
            reply_to = %email.reply_to,
            subject = %email.subject,
            "--- EMAIL (console) ---\nFrom: {}\nTo: {}\nReply-To: {}\nSubject: {}\n\n{}\n--- END EMAIL ---",
            email.from,
            email.to,
            email.reply_to,
            email.subject,
            email.text
        );

        Ok(())
    }
}
