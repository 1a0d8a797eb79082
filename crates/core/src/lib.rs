//! Shared primitives for all Rust crates in the portfolio backend.

#![forbid(unsafe_code)]

mod field_violations;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use field_violations::FieldViolations;

/// Result type used across portfolio crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Creates a non-empty string, mapping blank input to `None`.
    #[must_use]
    pub fn from_optional(value: Option<String>) -> Option<Self> {
        value.and_then(|value| Self::new(value).ok())
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid configuration or malformed input that is not tied to a form field.
    #[error("validation error: {0}")]
    Validation(String),

    /// One or more submitted form fields violated their rules.
    #[error("validation failed: {0}")]
    InvalidFields(FieldViolations),

    /// Caller exceeded the allowed number of attempts in the current window.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Outbound delivery is not configured on this server.
    #[error("delivery unavailable: {0}")]
    DeliveryUnavailable(String),

    /// Outbound delivery was attempted and failed.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
