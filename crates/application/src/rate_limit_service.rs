//! Rate limiting ports and application service.
//!
//! Implements a fixed-window limiter: the window is anchored at the first
//! attempt and the counter resets once the window has elapsed.

mod config;
mod ports;
mod service;

#[cfg(test)]
mod tests;

pub use config::RateLimitRule;
pub use ports::{AttemptInfo, LedgerDecision, RateLimitLedger};
pub use service::RateLimitService;
