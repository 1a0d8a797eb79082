//! Contact form submission and the validation rules shared by the server and
//! the form client.

use portfolio_core::FieldViolations;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum trimmed length of the sender name, in UTF-16 code units.
pub const NAME_MIN_LENGTH: usize = 2;

/// Maximum trimmed length of the sender name, in UTF-16 code units.
pub const NAME_MAX_LENGTH: usize = 80;

/// Minimum trimmed length of the message body, in UTF-16 code units.
pub const MESSAGE_MIN_LENGTH: usize = 10;

/// Maximum trimmed length of the message body, in UTF-16 code units.
pub const MESSAGE_MAX_LENGTH: usize = 2000;

/// Unique identifier attached to one inbound submission for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Creates a new random submission identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// Sender display name.
    Name,
    /// Sender reply address.
    Email,
    /// Message body.
    Message,
}

impl ContactField {
    /// Wire name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// Human-readable message reported when the field is invalid.
    #[must_use]
    pub fn violation_message(self) -> &'static str {
        match self {
            Self::Name => "Name must be between 2 and 80 characters",
            Self::Email => "Please enter a valid email address",
            Self::Message => "Message must be between 10 and 2000 characters",
        }
    }
}

/// One candidate contact message as received from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Sender display name.
    pub name: String,
    /// Sender email, used as the reply-to address.
    pub email: String,
    /// Optional subject line.
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
    /// Hidden field that humans never fill in.
    pub trap: Option<String>,
}

impl ContactSubmission {
    /// Returns true when the hidden trap field carries a non-blank value.
    #[must_use]
    pub fn is_trapped(&self) -> bool {
        self.trap
            .as_deref()
            .is_some_and(|value| !form_trim(value).is_empty())
    }

    /// Returns the trimmed subject when one was supplied.
    #[must_use]
    pub fn subject_line(&self) -> Option<&str> {
        self.subject
            .as_deref()
            .map(form_trim)
            .filter(|value| !value.is_empty())
    }

    /// Runs every field rule and collects all violations.
    pub fn validate(&self) -> Result<(), FieldViolations> {
        let mut violations = FieldViolations::new();

        if !is_valid_name(&self.name) {
            record(&mut violations, ContactField::Name);
        }
        if !is_valid_email_shape(&self.email) {
            record(&mut violations, ContactField::Email);
        }
        if !is_valid_message(&self.message) {
            record(&mut violations, ContactField::Message);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn record(violations: &mut FieldViolations, field: ContactField) {
    violations.insert(field.as_str(), field.violation_message());
}

/// Checks the trimmed sender name length.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    trimmed_length_within(name, NAME_MIN_LENGTH, NAME_MAX_LENGTH)
}

/// Checks the trimmed message length.
#[must_use]
pub fn is_valid_message(message: &str) -> bool {
    trimmed_length_within(message, MESSAGE_MIN_LENGTH, MESSAGE_MAX_LENGTH)
}

/// Minimal address shape check: `local@domain.tld`, where no part contains
/// whitespace or `@` and each part is non-empty.
///
/// This is not RFC 5322 validation and is applied to the raw, untrimmed value.
#[must_use]
pub fn is_valid_email_shape(email: &str) -> bool {
    if email.chars().any(is_form_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, character)| character == '.' && index > 0 && index + 1 < domain.len())
}

/// Whitespace as browsers define it for `\s` and `String.prototype.trim`:
/// Unicode `White_Space` without U+0085, plus the byte order mark.
fn is_form_whitespace(character: char) -> bool {
    (character.is_whitespace() && character != '\u{85}') || character == '\u{feff}'
}

fn form_trim(value: &str) -> &str {
    value.trim_matches(is_form_whitespace)
}

// Lengths are UTF-16 code units, matching browser `String.length`.
fn trimmed_length_within(value: &str, min: usize, max: usize) -> bool {
    let length = form_trim(value).encode_utf16().count();
    (min..=max).contains(&length)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_owned(),
            email: email.to_owned(),
            subject: None,
            message: message.to_owned(),
            trap: None,
        }
    }

    #[test]
    fn name_boundaries() {
        assert!(!is_valid_name("A"));
        assert!(is_valid_name("Al"));
        assert!(is_valid_name(&"n".repeat(80)));
        assert!(!is_valid_name(&"n".repeat(81)));
    }

    #[test]
    fn name_is_measured_after_trimming() {
        assert!(!is_valid_name("  A  "));
        assert!(is_valid_name("  Al  "));
    }

    #[test]
    fn message_boundaries() {
        assert!(!is_valid_message(&"m".repeat(9)));
        assert!(is_valid_message(&"m".repeat(10)));
        assert!(is_valid_message(&"m".repeat(2000)));
        assert!(!is_valid_message(&"m".repeat(2001)));
    }

    #[test]
    fn message_length_counts_characters_not_bytes() {
        assert!(is_valid_message(&"é".repeat(2000)));
    }

    #[test]
    fn lengths_count_utf16_code_units() {
        assert!(is_valid_name("😀"));
        assert!(!is_valid_name("😀".repeat(41).as_str()));
        assert!(is_valid_message(&"😀".repeat(1000)));
        assert!(!is_valid_message(&"😀".repeat(1001)));
    }

    #[test]
    fn whitespace_follows_browser_rules() {
        assert!(!is_valid_name("\u{feff}A\u{feff}"));
        assert!(is_valid_name("A\u{85}"));
        assert!(!is_valid_email_shape("a\u{feff}b@c.d"));
        assert!(is_valid_email_shape("a\u{85}b@c.d"));
        assert!(!is_valid_email_shape("a\u{a0}b@c.d"));
    }

    #[test]
    fn email_shape_accepts_minimal_address() {
        assert!(is_valid_email_shape("a@b.c"));
        assert!(is_valid_email_shape("first.last@sub.example.org"));
    }

    #[test]
    fn email_shape_rejects_malformed_addresses() {
        for value in [
            "not-an-email",
            "",
            "@b.c",
            "a@.c",
            "a@b.",
            "a@bc",
            "a@b@c.d",
            "a b@c.d",
            " a@b.c",
        ] {
            assert!(!is_valid_email_shape(value), "accepted {value:?}");
        }
    }

    #[test]
    fn validate_collects_every_violation() {
        let result = submission("A", "not-an-email", "short").validate();
        let violations = result.err().unwrap_or_default();

        assert_eq!(violations.len(), 3);
        assert_eq!(
            violations.get("name"),
            Some("Name must be between 2 and 80 characters")
        );
        assert!(violations.contains("email"));
        assert!(violations.contains("message"));
    }

    #[test]
    fn validate_accepts_reference_submission() {
        let result = submission("Al", "al@x.com", "Hello there, this is long enough.").validate();
        assert!(result.is_ok());
    }

    #[test]
    fn trap_requires_non_blank_value() {
        let mut value = submission("Al", "al@x.com", "Hello there, this is long enough.");
        assert!(!value.is_trapped());

        value.trap = Some("   ".to_owned());
        assert!(!value.is_trapped());

        value.trap = Some("https://spam.example".to_owned());
        assert!(value.is_trapped());
    }

    #[test]
    fn blank_subject_is_treated_as_missing() {
        let mut value = submission("Al", "al@x.com", "Hello there, this is long enough.");
        value.subject = Some("  ".to_owned());
        assert_eq!(value.subject_line(), None);

        value.subject = Some(" Hiring ".to_owned());
        assert_eq!(value.subject_line(), Some("Hiring"));
    }

    proptest! {
        #[test]
        fn name_validity_tracks_trimmed_length(name in "[a-zA-Z ]{0,100}") {
            let length = name.trim().chars().count();
            prop_assert_eq!(is_valid_name(&name), (2..=80).contains(&length));
        }

        #[test]
        fn addresses_with_whitespace_never_pass(
            local in "[a-z]{1,8}",
            domain in "[a-z]{1,8}",
            tld in "[a-z]{1,4}",
            gap in "[ \t]",
        ) {
            let address = format!("{local}{gap}@{domain}.{tld}");
            prop_assert!(!is_valid_email_shape(&address));
            let valid = format!("{local}@{domain}.{tld}");
            prop_assert!(is_valid_email_shape(&valid));
        }

        #[test]
        fn violation_keys_match_failing_rules(
            name in ".{0,90}",
            email in "[a-z@. ]{0,12}",
            message in ".{0,40}",
        ) {
            let value = submission(&name, &email, &message);
            let violations = value.validate().err().unwrap_or_default();
            prop_assert_eq!(violations.contains("name"), !is_valid_name(&name));
            prop_assert_eq!(violations.contains("email"), !is_valid_email_shape(&email));
            prop_assert_eq!(violations.contains("message"), !is_valid_message(&message));
        }
    }
}
