use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::http::header::{HOST, ORIGIN};
use portfolio_application::{SubmissionContext, SubmissionReceipt};
use portfolio_core::AppError;
use portfolio_domain::{ClientIdentifier, ContactSubmission};
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::dto::{ContactRequest, ContactResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/contact - Runs a contact form submission through the guard.
pub async fn submit_contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<Json<ContactResponse>> {
    let context = submission_context(&headers);
    let span = info_span!(
        "contact_submission",
        submission_id = %context.submission_id,
        client = %context.client,
    );

    process_submission(state, context, payload)
        .instrument(span)
        .await
}

async fn process_submission(
    state: AppState,
    context: SubmissionContext,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<Json<ContactResponse>> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(
            error = %rejection.body_text(),
            "rejected malformed contact request body"
        );
        AppError::Validation("Invalid request body".to_owned())
    })?;

    let result = state
        .contact_service
        .submit(ContactSubmission::from(payload), &context)
        .await;

    match &result {
        Ok(SubmissionReceipt::Delivered) => info!("contact submission delivered"),
        Ok(SubmissionReceipt::Suppressed) => debug!("contact submission suppressed by honeypot"),
        Err(rejection) => log_rejection(rejection),
    }

    result?;
    Ok(Json(ContactResponse::accepted()))
}

fn submission_context(headers: &HeaderMap) -> SubmissionContext {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let client = ClientIdentifier::from_forwarding_headers(
        header_value("x-forwarded-for"),
        header_value("x-real-ip"),
    );
    let origin = header_value(ORIGIN.as_str())
        .or_else(|| header_value(HOST.as_str()))
        .map(ToOwned::to_owned);

    SubmissionContext::new(client, origin)
}

fn log_rejection(rejection: &AppError) {
    match rejection {
        AppError::RateLimited(_) => warn!("contact submission rate limited"),
        AppError::InvalidFields(fields) => {
            info!(fields = %fields, "contact submission failed validation");
        }
        AppError::DeliveryUnavailable(detail) => {
            error!(detail = %detail, "contact delivery is not configured");
        }
        AppError::DeliveryFailed(detail) | AppError::Internal(detail) => {
            error!(detail = %detail, "contact delivery failed");
        }
        AppError::Validation(detail) => warn!(detail = %detail, "contact submission rejected"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::extract::State;
    use axum::http::{HeaderMap, HeaderValue};
    use portfolio_application::{
        Clock, ContactRouting, ContactService, RateLimitRule, RateLimitService,
    };
    use portfolio_infrastructure::{InMemoryRateLimitLedger, SystemClock};
    use tracing::field::{Field, Visit};
    use tracing::{Subscriber, span};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::{submission_context, submit_contact_handler};
    use crate::dto::ContactRequest;
    use crate::state::AppState;

    #[derive(Clone, Default)]
    struct SubmissionSpans {
        fields: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl SubmissionSpans {
        fn field(&self, name: &str) -> Option<String> {
            self.fields.lock().ok().and_then(|fields| {
                fields
                    .iter()
                    .find(|(field, _)| field == name)
                    .map(|(_, value)| value.clone())
            })
        }
    }

    struct FieldCollector(Vec<(String, String)>);

    impl Visit for FieldCollector {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0.push((field.name().to_owned(), format!("{value:?}")));
        }
    }

    impl<S: Subscriber> Layer<S> for SubmissionSpans {
        fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
            if attrs.metadata().name() != "contact_submission" {
                return;
            }

            let mut collector = FieldCollector(Vec::new());
            attrs.record(&mut collector);
            if let Ok(mut fields) = self.fields.lock() {
                fields.extend(collector.0);
            }
        }
    }

    fn state() -> AppState {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        AppState {
            contact_service: ContactService::new(
                RateLimitService::new(Arc::new(InMemoryRateLimitLedger::new()), clock.clone()),
                RateLimitRule::contact(),
                None,
                ContactRouting::new(None),
                clock,
            ),
        }
    }

    #[tokio::test]
    async fn submission_runs_inside_a_span_carrying_its_id() {
        let spans = SubmissionSpans::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(spans.clone()));

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));
        let request = ContactRequest {
            website: Some("https://spam.example".to_owned()),
            ..ContactRequest::default()
        };

        let result = submit_contact_handler(State(state()), headers, Ok(Json(request))).await;

        assert!(result.is_ok());
        assert_eq!(spans.field("client").as_deref(), Some("203.0.113.7"));
        let submission_id = spans.field("submission_id").unwrap_or_default();
        assert_eq!(submission_id.len(), 36);
    }

    #[test]
    fn context_prefers_first_forwarded_hop_and_origin() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        headers.insert("origin", HeaderValue::from_static("https://portfolio.example"));
        headers.insert("host", HeaderValue::from_static("api.portfolio.example"));

        let context = submission_context(&headers);
        assert_eq!(context.client.as_str(), "203.0.113.7");
        assert_eq!(context.origin.as_deref(), Some("https://portfolio.example"));
    }

    #[test]
    fn context_falls_back_to_real_ip_and_host() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        headers.insert("host", HeaderValue::from_static("api.portfolio.example"));

        let context = submission_context(&headers);
        assert_eq!(context.client.as_str(), "198.51.100.4");
        assert_eq!(context.origin.as_deref(), Some("api.portfolio.example"));
    }

    #[test]
    fn context_without_headers_is_unknown() {
        let context = submission_context(&HeaderMap::new());
        assert!(context.client.is_unknown());
        assert!(context.origin.is_none());
    }
}
