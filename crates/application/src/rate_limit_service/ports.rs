use async_trait::async_trait;
use chrono::{DateTime, Utc};

use portfolio_core::AppResult;

/// Storage port for rate limit counters.
#[async_trait]
pub trait RateLimitLedger: Send + Sync {
    /// Records an attempt for the given key at `now`.
    ///
    /// Implementations must perform the read-compare-update as one atomic
    /// step per key:
    /// - no entry, or `now` past the reset instant: start a new window with a
    ///   count of one and allow;
    /// - count already at `max_attempts`: deny and leave the entry unchanged;
    /// - otherwise increment and allow.
    async fn record_attempt(
        &self,
        key: &str,
        max_attempts: u32,
        window_seconds: i64,
        now: DateTime<Utc>,
    ) -> AppResult<LedgerDecision>;

    /// Returns the stored window for a key, if any.
    async fn attempt_info(&self, key: &str) -> AppResult<Option<AttemptInfo>>;
}

/// State of the current rate limit window for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptInfo {
    /// Number of accepted attempts in the current window.
    pub attempt_count: u32,
    /// Instant after which the window resets.
    pub window_reset_at: DateTime<Utc>,
}

/// Outcome of recording one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerDecision {
    /// The attempt was counted.
    Allowed(AttemptInfo),
    /// The ceiling was already reached; nothing was counted.
    Denied(AttemptInfo),
}

impl LedgerDecision {
    /// Window state after the decision.
    #[must_use]
    pub fn info(&self) -> AttemptInfo {
        match self {
            Self::Allowed(info) | Self::Denied(info) => *info,
        }
    }
}
