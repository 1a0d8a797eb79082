use portfolio_core::FieldViolations;
use serde::Deserialize;

use crate::draft::ClientFeedback;

/// Response body returned by the contact endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactResponseBody {
    /// Whether the server accepted the message.
    pub ok: bool,
    /// Client-safe failure description.
    #[serde(default)]
    pub error: Option<String>,
    /// Per-field violations for validation failures.
    #[serde(default)]
    pub fields: Option<FieldViolations>,
}

/// What the visitor should be told after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The server accepted the message.
    Sent,
    /// The draft failed the local precheck and was not transmitted.
    NotSent(ClientFeedback),
    /// The server throttled this client.
    RateLimited,
    /// The server refused the message.
    Rejected {
        /// Server-provided or generic failure message.
        message: String,
        /// Field violations reported by the server, if any.
        fields: Option<FieldViolations>,
    },
    /// The message was not delivered because of a transport or server fault.
    Undelivered {
        /// Address the visitor can write to directly instead.
        fallback_email: String,
    },
}

impl ContactOutcome {
    /// Toast-style message for the visitor.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Sent => "Message sent successfully! I'll get back to you soon.".to_owned(),
            Self::NotSent(feedback) => feedback.message().to_owned(),
            Self::RateLimited => "Too many requests. Please try again in a minute.".to_owned(),
            Self::Rejected { message, .. } => message.clone(),
            Self::Undelivered { fallback_email } => format!(
                "Failed to send message. Please try emailing me directly at {fallback_email}"
            ),
        }
    }

    /// Returns true when the form should be cleared.
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Maps an HTTP status and decoded body to an outcome.
///
/// `body` is `None` when the response was not valid JSON. Server faults and
/// undecodable bodies point the visitor at `fallback_email`.
#[must_use]
pub fn interpret_response(
    status: u16,
    body: Option<ContactResponseBody>,
    fallback_email: &str,
) -> ContactOutcome {
    if status == 429 {
        return ContactOutcome::RateLimited;
    }

    let Some(body) = body.filter(|_| status < 500) else {
        return ContactOutcome::Undelivered {
            fallback_email: fallback_email.to_owned(),
        };
    };
    if (200..300).contains(&status) && body.ok {
        return ContactOutcome::Sent;
    }

    ContactOutcome::Rejected {
        message: body
            .error
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| "Failed to send message".to_owned()),
        fields: body.fields,
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactOutcome, ContactResponseBody, interpret_response};

    const OWNER: &str = "owner@example.com";

    fn decode(json: serde_json::Value) -> Option<ContactResponseBody> {
        serde_json::from_value(json).ok()
    }

    #[test]
    fn ok_response_is_sent() {
        let outcome = interpret_response(200, decode(serde_json::json!({"ok": true})), OWNER);
        assert!(outcome.is_sent());
    }

    #[test]
    fn too_many_requests_is_rate_limited() {
        let outcome = interpret_response(
            429,
            decode(serde_json::json!({
                "ok": false,
                "error": "Too many requests. Please try again later.",
            })),
            OWNER,
        );
        assert_eq!(outcome, ContactOutcome::RateLimited);
        assert_eq!(
            outcome.message(),
            "Too many requests. Please try again in a minute."
        );
    }

    #[test]
    fn validation_failure_carries_fields() {
        let outcome = interpret_response(
            400,
            decode(serde_json::json!({
                "ok": false,
                "error": "Validation failed",
                "fields": {"email": "Please enter a valid email address"},
            })),
            OWNER,
        );

        match outcome {
            ContactOutcome::Rejected { message, fields } => {
                assert_eq!(message, "Validation failed");
                assert_eq!(
                    fields.as_ref().and_then(|fields| fields.get("email")),
                    Some("Please enter a valid email address")
                );
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn client_error_without_message_uses_generic_text() {
        let outcome = interpret_response(400, decode(serde_json::json!({"ok": false})), OWNER);
        assert_eq!(outcome.message(), "Failed to send message");
    }

    #[test]
    fn server_fault_offers_direct_email() {
        let outcome = interpret_response(
            500,
            decode(serde_json::json!({
                "ok": false,
                "error": "Failed to send message. Please try again later.",
            })),
            OWNER,
        );

        assert_eq!(
            outcome,
            ContactOutcome::Undelivered {
                fallback_email: OWNER.to_owned(),
            }
        );
        assert!(outcome.message().ends_with(OWNER));
    }

    #[test]
    fn undecodable_body_offers_direct_email() {
        let outcome = interpret_response(502, None, OWNER);
        assert!(outcome.message().contains("emailing me directly"));

        let outcome = interpret_response(200, None, OWNER);
        assert!(outcome.message().ends_with(OWNER));
    }

    #[test]
    fn success_status_without_ok_flag_is_rejected() {
        let outcome = interpret_response(200, decode(serde_json::json!({"ok": false})), OWNER);
        assert!(!outcome.is_sent());
    }

    #[test]
    fn undelivered_message_offers_direct_email() {
        let outcome = ContactOutcome::Undelivered {
            fallback_email: OWNER.to_owned(),
        };
        assert!(outcome.message().ends_with(OWNER));
    }
}
