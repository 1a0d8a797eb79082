use portfolio_core::FieldViolations;
use portfolio_domain::{ContactField, ContactSubmission};
use serde::Serialize;

/// Form state as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    /// Sender display name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Optional subject; blank means none.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Hidden field; only automated fillers put anything here.
    pub website: String,
}

/// JSON body posted to the contact endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct ContactRequestBody<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<&'a str>,
}

impl ContactDraft {
    /// Domain view of the draft used for validation.
    #[must_use]
    pub fn to_submission(&self) -> ContactSubmission {
        ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: Some(self.subject.clone()),
            message: self.message.clone(),
            trap: Some(self.website.clone()),
        }
    }

    pub(crate) fn request_body(&self) -> ContactRequestBody<'_> {
        let subject = self.subject.trim();
        ContactRequestBody {
            name: &self.name,
            email: &self.email,
            subject: (!subject.is_empty()).then_some(subject),
            message: &self.message,
            website: (!self.website.is_empty()).then_some(self.website.as_str()),
        }
    }
}

/// Reason a draft was not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientFeedback {
    /// The hidden field was filled in; the form pretends something failed.
    Blocked,
    /// One or more fields break the shared rules.
    Invalid(FieldViolations),
}

impl ClientFeedback {
    /// Message to show the visitor. For invalid drafts this is the first
    /// violation in form order.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Blocked => "Something went wrong. Please try again.",
            Self::Invalid(violations) => [
                ContactField::Name,
                ContactField::Email,
                ContactField::Message,
            ]
            .into_iter()
            .find_map(|field| violations.get(field.as_str()))
            .unwrap_or("Please check the highlighted fields"),
        }
    }
}

/// Checks a draft before transmission.
pub fn precheck(draft: &ContactDraft) -> Result<(), ClientFeedback> {
    let submission = draft.to_submission();
    if submission.is_trapped() {
        return Err(ClientFeedback::Blocked);
    }

    submission.validate().map_err(ClientFeedback::Invalid)
}
