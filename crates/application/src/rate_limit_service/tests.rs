use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use portfolio_core::{AppError, AppResult};

use super::{AttemptInfo, LedgerDecision, RateLimitLedger, RateLimitRule, RateLimitService};
use crate::Clock;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

struct ScriptedLedger {
    allow: bool,
    calls: Mutex<Vec<(String, u32, i64, DateTime<Utc>)>>,
}

impl ScriptedLedger {
    fn new(allow: bool) -> Self {
        Self {
            allow,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RateLimitLedger for ScriptedLedger {
    async fn record_attempt(
        &self,
        key: &str,
        max_attempts: u32,
        window_seconds: i64,
        now: DateTime<Utc>,
    ) -> AppResult<LedgerDecision> {
        self.calls
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock ledger state: {error}")))?
            .push((key.to_owned(), max_attempts, window_seconds, now));

        let info = AttemptInfo {
            attempt_count: 1,
            window_reset_at: now,
        };
        Ok(if self.allow {
            LedgerDecision::Allowed(info)
        } else {
            LedgerDecision::Denied(info)
        })
    }

    async fn attempt_info(&self, _key: &str) -> AppResult<Option<AttemptInfo>> {
        Ok(None)
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

#[tokio::test]
async fn check_passes_rule_and_clock_to_ledger() {
    let ledger = Arc::new(ScriptedLedger::new(true));
    let service = RateLimitService::new(ledger.clone(), Arc::new(FixedClock(fixed_now())));

    let result = service
        .check_rate_limit(&RateLimitRule::contact(), "203.0.113.7")
        .await;
    assert!(result.is_ok());

    let calls = ledger
        .calls
        .lock()
        .map(|guard| guard.clone())
        .unwrap_or_default();
    assert_eq!(
        calls,
        vec![("contact:203.0.113.7".to_owned(), 3, 60, fixed_now())]
    );
}

#[tokio::test]
async fn denied_attempt_maps_to_rate_limited() {
    let service = RateLimitService::new(
        Arc::new(ScriptedLedger::new(false)),
        Arc::new(FixedClock(fixed_now())),
    );

    let result = service
        .check_rate_limit(&RateLimitRule::contact(), "unknown")
        .await;
    assert!(matches!(result, Err(AppError::RateLimited(_))));
}

#[test]
fn rule_keys_are_scoped_by_category() {
    let rule = RateLimitRule::new("contact", 3, 60);
    assert_eq!(rule.key_for("unknown"), "contact:unknown");
    assert_eq!(RateLimitRule::default(), rule);
}
