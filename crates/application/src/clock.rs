use chrono::{DateTime, Utc};

/// Time source port so window arithmetic and timestamps can be controlled in tests.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}
