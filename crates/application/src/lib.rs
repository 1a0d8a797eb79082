//! Application services and ports.

#![forbid(unsafe_code)]

mod clock;
mod contact_service;
mod rate_limit_service;

pub use clock::Clock;
pub use contact_service::{
    ContactRouting, ContactService, DEFAULT_FROM_ADDRESS, EmailService, NotificationMetadata,
    OutboundEmail, SubmissionContext, SubmissionReceipt, compose_notification,
    notification_subject,
};
pub use rate_limit_service::{
    AttemptInfo, LedgerDecision, RateLimitLedger, RateLimitRule, RateLimitService,
};
