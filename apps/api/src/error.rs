use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use portfolio_core::AppError;
use serde::Serialize;
use ts_rs::TS;

const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";
const DELIVERY_UNAVAILABLE_MESSAGE: &str = "Email service not configured";
const DELIVERY_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "error-response.ts")]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    /// Per-field violation messages, present only for field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub fields: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            fields: None,
        }
    }
}

/// HTTP API error wrapper around core application errors.
///
/// Internal detail never reaches the response body; callers log it first.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = match self.0 {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::message(message))
            }
            AppError::InvalidFields(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    ok: false,
                    error: VALIDATION_FAILED_MESSAGE.to_owned(),
                    fields: Some(fields.into_inner()),
                },
            ),
            AppError::RateLimited(_) => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::message(RATE_LIMITED_MESSAGE),
            ),
            AppError::DeliveryUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::message(DELIVERY_UNAVAILABLE_MESSAGE),
            ),
            AppError::DeliveryFailed(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::message(DELIVERY_FAILED_MESSAGE),
            ),
        };

        (status, Json(payload)).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
