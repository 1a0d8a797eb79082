//! Contact form submission guard.
//!
//! Applies the spam trap, rate limit, field validation and delivery
//! preconditions in that order, then relays the message to the owner's inbox.

mod notification;
mod ports;
mod service;


pub use notification::{NotificationMetadata, compose_notification, notification_subject};
pub use ports::{EmailService, OutboundEmail};
pub use service::{
    ContactRouting, ContactService, DEFAULT_FROM_ADDRESS, SubmissionContext, SubmissionReceipt,
};
