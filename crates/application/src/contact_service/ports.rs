use async_trait::async_trait;

use portfolio_core::AppResult;

/// A fully composed message ready for an email provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Fixed sender identity of the site.
    pub from: String,
    /// Owner inbox receiving the notification.
    pub to: String,
    /// Address replies should go to, i.e. the person who filled in the form.
    pub reply_to: String,
    /// Subject line.
    pub subject: String,
    /// HTML rendering.
    pub html: String,
    /// Plain-text rendering.
    pub text: String,
}

/// Port for sending email.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends one message. Implementations must not retry.
    async fn send_email(&self, email: &OutboundEmail) -> AppResult<()>;
}
