//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_email_service;
mod in_memory_rate_limit_ledger;
mod resend_email_service;
mod smtp_email_service;
mod system_clock;

pub use console_email_service::ConsoleEmailService;
pub use in_memory_rate_limit_ledger::InMemoryRateLimitLedger;
pub use resend_email_service::{RESEND_API_URL, ResendEmailConfig, ResendEmailService};
pub use smtp_email_service::{SmtpEmailConfig, SmtpEmailService};
pub use system_clock::SystemClock;
