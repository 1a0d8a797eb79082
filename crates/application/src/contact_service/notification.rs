use chrono::{DateTime, SecondsFormat, Utc};
use portfolio_domain::{ClientIdentifier, ContactSubmission};

use super::ports::OutboundEmail;

const SUBJECT_PREFIX: &str = "Portfolio contact";
const MISSING_SUBJECT: &str = "No subject";

/// Request metadata appended to every notification.
#[derive(Debug, Clone)]
pub struct NotificationMetadata<'a> {
    /// When the submission was received.
    pub submitted_at: DateTime<Utc>,
    /// Best-effort page origin or host the form was posted from.
    pub origin: &'a str,
    /// Best-effort client identifier.
    pub client: &'a ClientIdentifier,
}

/// Subject line for the owner's inbox; falls back to the sender's name.
#[must_use]
pub fn notification_subject(submission: &ContactSubmission) -> String {
    match submission.subject_line() {
        Some(subject) => format!("{SUBJECT_PREFIX}: {subject}"),
        None => format!("{SUBJECT_PREFIX}: {}", submission.name.trim()),
    }
}

/// Builds the notification sent to the site owner.
#[must_use]
pub fn compose_notification(
    submission: &ContactSubmission,
    metadata: &NotificationMetadata<'_>,
    from: &str,
    to: &str,
) -> OutboundEmail {
    OutboundEmail {
        from: from.to_owned(),
        to: to.to_owned(),
        reply_to: submission.email.clone(),
        subject: notification_subject(submission),
        html: render_html(submission, metadata),
        text: render_text(submission, metadata),
    }
}

fn render_text(submission: &ContactSubmission, metadata: &NotificationMetadata<'_>) -> String {
    format!(
        "New Contact Form Submission\n\
         \n\
         Name: {name}\n\
         Email: {email}\n\
         Subject: {subject}\n\
         \n\
         Message:\n\
         {message}\n\
         \n\
         ---\n\
         Submitted: {submitted}\n\
         Origin: {origin}\n\
         IP: {client}\n",
        name = submission.name,
        email = submission.email,
        subject = submission.subject_line().unwrap_or(MISSING_SUBJECT),
        message = submission.message,
        submitted = timestamp(metadata.submitted_at),
        origin = metadata.origin,
        client = metadata.client,
    )
}

fn render_html(submission: &ContactSubmission, metadata: &NotificationMetadata<'_>) -> String {
    let message = submission
        .message
        .lines()
        .map(ammonia::clean_text)
        .collect::<Vec<_>>()
        .join("<br>");

    format!(
        "<h2>New Contact Form Submission</h2>\n\
         <p><strong>Name:</strong> {name}</p>\n\
         <p><strong>Email:</strong> {email}</p>\n\
         <p><strong>Subject:</strong> {subject}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{message}</p>\n\
         <hr>\n\
         <p style=\"color: #666; font-size: 12px;\">\n\
         <strong>Submitted:</strong> {submitted}<br>\n\
         <strong>Origin:</strong> {origin}<br>\n\
         <strong>IP:</strong> {client}\n\
         </p>\n",
        name = ammonia::clean_text(&submission.name),
        email = ammonia::clean_text(&submission.email),
        subject = ammonia::clean_text(submission.subject_line().unwrap_or(MISSING_SUBJECT)),
        submitted = timestamp(metadata.submitted_at),
        origin = ammonia::clean_text(metadata.origin),
        client = ammonia::clean_text(metadata.client.as_str()),
    )
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
