use std::sync::Arc;

use portfolio_application::{Clock, ContactRouting, ContactService, RateLimitService};
use portfolio_core::AppError;
use portfolio_infrastructure::{InMemoryRateLimitLedger, SystemClock};
use tracing::warn;

use super::email::build_email_service;
use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let rate_limit_service =
        RateLimitService::new(Arc::new(InMemoryRateLimitLedger::new()), clock.clone());

    if config.contact_to_email.is_none() {
        warn!("CONTACT_TO_EMAIL is not set; contact submissions cannot be delivered");
    }
    let routing = ContactRouting::new(config.contact_to_email.clone())
        .with_from_address(config.from_email.clone());

    let contact_service = ContactService::new(
        rate_limit_service,
        config.rate_limit_rule.clone(),
        build_email_service(config)?,
        routing,
        clock,
    );

    Ok(AppState { contact_service })
}
