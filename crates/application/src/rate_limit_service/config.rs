/// Configuration for a rate limit rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitRule {
    /// Key prefix separating independent limits (e.g., "contact").
    pub category: String,
    /// Maximum number of attempts allowed in the window.
    pub max_attempts: u32,
    /// Window duration in seconds.
    pub window_seconds: i64,
}

impl RateLimitRule {
    /// Default ceiling for contact form submissions per client.
    pub const CONTACT_MAX_ATTEMPTS: u32 = 3;

    /// Default contact window length in seconds.
    pub const CONTACT_WINDOW_SECONDS: i64 = 60;

    /// Creates a new rate limit rule.
    #[must_use]
    pub fn new(category: impl Into<String>, max_attempts: u32, window_seconds: i64) -> Self {
        Self {
            category: category.into(),
            max_attempts,
            window_seconds,
        }
    }

    /// Three contact submissions per client per minute.
    #[must_use]
    pub fn contact() -> Self {
        Self::new(
            "contact",
            Self::CONTACT_MAX_ATTEMPTS,
            Self::CONTACT_WINDOW_SECONDS,
        )
    }

    /// Builds the ledger key for an identifier under this rule.
    #[must_use]
    pub fn key_for(&self, identifier: &str) -> String {
        format!("{}:{identifier}", self.category)
    }
}

impl Default for RateLimitRule {
    fn default() -> Self {
        Self::contact()
    }
}
