use std::time::Duration;

use portfolio_core::{AppError, AppResult};

use crate::draft::{ContactDraft, precheck};
use crate::outcome::{ContactOutcome, ContactResponseBody, interpret_response};

/// Path of the contact endpoint relative to the site origin.
pub const CONTACT_PATH: &str = "/api/contact";

/// HTTP client submitting drafts to the contact endpoint.
#[derive(Clone)]
pub struct ContactClient {
    http_client: reqwest::Client,
    endpoint: String,
    fallback_email: String,
}

impl ContactClient {
    /// Creates a client for the site at `base_url`.
    ///
    /// `fallback_email` is offered to the visitor when the server cannot be
    /// reached or fails to deliver the message.
    pub fn new(base_url: &str, fallback_email: impl Into<String>) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}{CONTACT_PATH}", base_url.trim_end_matches('/')),
            fallback_email: fallback_email.into(),
        })
    }

    /// Full URL the client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Prechecks and submits a draft.
    pub async fn submit(&self, draft: &ContactDraft) -> ContactOutcome {
        if let Err(feedback) = precheck(draft) {
            return ContactOutcome::NotSent(feedback);
        }

        let response = match self
            .http_client
            .post(&self.endpoint)
            .json(&draft.request_body())
            .send()
            .await
        {
            Ok(response) => response,
            Err(_) => {
                return ContactOutcome::Undelivered {
                    fallback_email: self.fallback_email.clone(),
                };
            }
        };

        let status = response.status().as_u16();
        let body = response.json::<ContactResponseBody>().await.ok();
        interpret_response(status, body, &self.fallback_email)
    }
}
