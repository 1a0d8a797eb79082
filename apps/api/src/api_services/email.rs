use std::sync::Arc;

use portfolio_application::EmailService;
use portfolio_core::AppError;
use portfolio_infrastructure::{
    ConsoleEmailService, ResendEmailConfig, ResendEmailService, SmtpEmailConfig,
    SmtpEmailService,
};
use tracing::warn;

use crate::api_config::{ApiConfig, EmailProviderConfig};

/// Builds the configured email transport, or `None` when its credential is
/// missing. Submissions then fail with an unavailable-delivery error.
pub(super) fn build_email_service(
    config: &ApiConfig,
) -> Result<Option<Arc<dyn EmailService>>, AppError> {
    let service: Arc<dyn EmailService> = match &config.email_provider {
        EmailProviderConfig::Console => Arc::new(ConsoleEmailService::new()),
        EmailProviderConfig::Resend(resend) => {
            let Some(api_key) = resend.api_key.clone() else {
                warn!("RESEND_API_KEY is not set; contact submissions cannot be delivered");
                return Ok(None);
            };
            Arc::new(ResendEmailService::new(ResendEmailConfig {
                api_key,
                base_url: resend.base_url.clone(),
                timeout_seconds: config.email_timeout_seconds,
            })?)
        }
        EmailProviderConfig::Smtp(smtp) => {
            let Some(password) = smtp.password.clone() else {
                warn!("SMTP_PASSWORD is not set; contact submissions cannot be delivered");
                return Ok(None);
            };
            Arc::new(SmtpEmailService::new(SmtpEmailConfig {
                host: smtp.host.clone(),
                port: smtp.port,
                username: smtp.username.clone(),
                password,
                timeout_seconds: config.email_timeout_seconds,
            })?)
        }
    };

    Ok(Some(service))
}
