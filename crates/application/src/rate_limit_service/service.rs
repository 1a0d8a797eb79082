use std::sync::Arc;

use portfolio_core::{AppError, AppResult};

use super::config::RateLimitRule;
use super::ports::{AttemptInfo, LedgerDecision, RateLimitLedger};
use crate::Clock;

/// Application service for rate limiting.
#[derive(Clone)]
pub struct RateLimitService {
    ledger: Arc<dyn RateLimitLedger>,
    clock: Arc<dyn Clock>,
}

impl RateLimitService {
    /// Creates a new rate limit service.
    #[must_use]
    pub fn new(ledger: Arc<dyn RateLimitLedger>, clock: Arc<dyn Clock>) -> Self {
        Self { ledger, clock }
    }

    /// Checks whether the identifier is within the rule's limit.
    ///
    /// Records the attempt and returns the window state if allowed, or
    /// `Err(AppError::RateLimited)` if the ceiling was already reached.
    pub async fn check_rate_limit(
        &self,
        rule: &RateLimitRule,
        identifier: &str,
    ) -> AppResult<AttemptInfo> {
        let decision = self
            .ledger
            .record_attempt(
                &rule.key_for(identifier),
                rule.max_attempts,
                rule.window_seconds,
                self.clock.now(),
            )
            .await?;

        match decision {
            LedgerDecision::Allowed(info) => Ok(info),
            LedgerDecision::Denied(_) => Err(AppError::RateLimited(
                "Too many requests. Please try again later.".to_owned(),
            )),
        }
    }

    /// Returns the current window for the identifier without recording an attempt.
    pub async fn attempt_info(
        &self,
        rule: &RateLimitRule,
        identifier: &str,
    ) -> AppResult<Option<AttemptInfo>> {
        self.ledger.attempt_info(&rule.key_for(identifier)).await
    }
}
