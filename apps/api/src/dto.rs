use portfolio_domain::ContactSubmission;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "health-response.ts")]
pub struct HealthResponse {
    pub status: &'static str,
    pub delivery_configured: bool,
}

/// Incoming contact form payload.
///
/// Every field is optional on the wire so that missing values surface as
/// field violations rather than body rejections.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "contact-request.ts")]
pub struct ContactRequest {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub email: Option<String>,
    #[ts(optional)]
    pub subject: Option<String>,
    #[ts(optional)]
    pub message: Option<String>,
    /// Honeypot field. Real visitors never see or fill it.
    #[ts(optional)]
    pub website: Option<String>,
}

impl From<ContactRequest> for ContactSubmission {
    fn from(value: ContactRequest) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            subject: value.subject,
            message: value.message.unwrap_or_default(),
            trap: value.website,
        }
    }
}

/// Response for an accepted contact submission.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "contact-response.ts")]
pub struct ContactResponse {
    pub ok: bool,
}

impl ContactResponse {
    #[must_use]
    pub fn accepted() -> Self {
        Self { ok: true }
    }
}
