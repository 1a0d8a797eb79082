//! Process-local rate limit ledger.
//!
//! Counters live only as long as the process and are not shared between
//! instances, so a deployment with N instances admits up to N times the
//! configured ceiling. Entries are never evicted; a key's entry is replaced
//! when its window rolls over.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use portfolio_application::{AttemptInfo, LedgerDecision, RateLimitLedger};
use portfolio_core::{AppError, AppResult};
use tokio::sync::Mutex;

/// In-memory implementation of the rate limit ledger port.
#[derive(Default)]
pub struct InMemoryRateLimitLedger {
    entries: Mutex<HashMap<String, AttemptInfo>>,
}

impl InMemoryRateLimitLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently tracked.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns true when no key has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl RateLimitLedger for InMemoryRateLimitLedger {
    async fn record_attempt(
        &self,
        key: &str,
        max_attempts: u32,
        window_seconds: i64,
        now: DateTime<Utc>,
    ) -> AppResult<LedgerDecision> {
        // Held across the whole read-compare-update so concurrent attempts
        // for one key cannot both pass the ceiling check.
        let mut entries = self.entries.lock().await;

        match entries.get_mut(key) {
            Some(entry) if now <= entry.window_reset_at => {
                if entry.attempt_count >= max_attempts {
                    return Ok(LedgerDecision::Denied(*entry));
                }
                entry.attempt_count += 1;
                Ok(LedgerDecision::Allowed(*entry))
            }
            _ => {
                let window_reset_at = TimeDelta::try_seconds(window_seconds)
                    .and_then(|window| now.checked_add_signed(window))
                    .ok_or_else(|| {
                        AppError::Internal(format!(
                            "rate limit window of {window_seconds} seconds is out of range"
                        ))
                    })?;
                let entry = AttemptInfo {
                    attempt_count: 1,
                    window_reset_at,
                };
                entries.insert(key.to_owned(), entry);
                Ok(LedgerDecision::Allowed(entry))
            }
        }
    }

    async fn attempt_info(&self, key: &str) -> AppResult<Option<AttemptInfo>> {
        Ok(self.entries.lock().await.get(key).copied())
    }
}
