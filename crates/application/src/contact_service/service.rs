use std::sync::Arc;

use portfolio_core::{AppError, AppResult, NonEmptyString};
use portfolio_domain::{ClientIdentifier, ContactSubmission, SubmissionId};

use super::notification::{NotificationMetadata, compose_notification};
use super::ports::EmailService;
use crate::{Clock, RateLimitRule, RateLimitService};

/// Sender identity used when no override is configured.
pub const DEFAULT_FROM_ADDRESS: &str = "onboarding@resend.dev";

/// Where accepted submissions are delivered.
#[derive(Debug, Clone)]
pub struct ContactRouting {
    /// Owner inbox. Delivery is unavailable while this is unset.
    pub to_address: Option<NonEmptyString>,
    /// Fixed sender identity.
    pub from_address: String,
}

impl ContactRouting {
    /// Creates routing with the default sender identity.
    #[must_use]
    pub fn new(to_address: Option<NonEmptyString>) -> Self {
        Self {
            to_address,
            from_address: DEFAULT_FROM_ADDRESS.to_owned(),
        }
    }

    /// Overrides the sender identity.
    #[must_use]
    pub fn with_from_address(mut self, from_address: impl Into<String>) -> Self {
        self.from_address = from_address.into();
        self
    }
}

/// Per-request facts that do not come from the form body.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    /// Correlation id for logs.
    pub submission_id: SubmissionId,
    /// Best-effort client identity used as the rate limit key.
    pub client: ClientIdentifier,
    /// Best-effort origin or host the form was posted from.
    pub origin: Option<String>,
}

impl SubmissionContext {
    /// Creates a context with a fresh submission id.
    #[must_use]
    pub fn new(client: ClientIdentifier, origin: Option<String>) -> Self {
        Self {
            submission_id: SubmissionId::new(),
            client,
            origin,
        }
    }
}

/// Successful outcome of a submission. Both variants look identical to the
/// form client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionReceipt {
    /// The notification was handed to the email provider.
    Delivered,
    /// The spam trap was filled in and the payload was discarded.
    Suppressed,
}

/// Application service guarding the contact form.
#[derive(Clone)]
pub struct ContactService {
    rate_limit_service: RateLimitService,
    rate_limit_rule: RateLimitRule,
    email_service: Option<Arc<dyn EmailService>>,
    routing: ContactRouting,
    clock: Arc<dyn Clock>,
}

impl ContactService {
    /// Creates a new contact service.
    ///
    /// `email_service` is `None` when no delivery credential is configured.
    #[must_use]
    pub fn new(
        rate_limit_service: RateLimitService,
        rate_limit_rule: RateLimitRule,
        email_service: Option<Arc<dyn EmailService>>,
        routing: ContactRouting,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rate_limit_service,
            rate_limit_rule,
            email_service,
            routing,
            clock,
        }
    }

    /// Returns true when both a delivery credential and a destination are set.
    #[must_use]
    pub fn delivery_configured(&self) -> bool {
        self.email_service.is_some() && self.routing.to_address.is_some()
    }

    /// Rate limit rule applied to submissions.
    #[must_use]
    pub fn rate_limit_rule(&self) -> &RateLimitRule {
        &self.rate_limit_rule
    }

    /// Underlying rate limit service.
    #[must_use]
    pub fn rate_limit_service(&self) -> &RateLimitService {
        &self.rate_limit_service
    }

    /// Runs one submission through the guard.
    ///
    /// The rate limit slot is consumed before validation, so invalid
    /// submissions count against the client too.
    pub async fn submit(
        &self,
        submission: ContactSubmission,
        context: &SubmissionContext,
    ) -> AppResult<SubmissionReceipt> {
        if submission.is_trapped() {
            return Ok(SubmissionReceipt::Suppressed);
        }

        self.rate_limit_service
            .check_rate_limit(&self.rate_limit_rule, context.client.as_str())
            .await?;

        submission.validate().map_err(AppError::InvalidFields)?;

        let (email_service, to_address) = self.delivery_target()?;

        let origin = context
            .origin
            .as_deref()
            .unwrap_or(ClientIdentifier::UNKNOWN);
        let metadata = NotificationMetadata {
            submitted_at: self.clock.now(),
            origin,
            client: &context.client,
        };
        let email = compose_notification(
            &submission,
            &metadata,
            &self.routing.from_address,
            to_address.as_str(),
        );

        email_service
            .send_email(&email)
            .await
            .map_err(|error| match error {
                AppError::DeliveryFailed(message) => AppError::DeliveryFailed(message),
                other => AppError::DeliveryFailed(other.to_string()),
            })?;

        Ok(SubmissionReceipt::Delivered)
    }

    fn delivery_target(&self) -> AppResult<(&Arc<dyn EmailService>, &NonEmptyString)> {
        let email_service = self.email_service.as_ref().ok_or_else(|| {
            AppError::DeliveryUnavailable("email delivery credential is not configured".to_owned())
        })?;
        let to_address = self.routing.to_address.as_ref().ok_or_else(|| {
            AppError::DeliveryUnavailable("CONTACT_TO_EMAIL is not configured".to_owned())
        })?;

        Ok((email_service, to_address))
    }
}
