//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod client;
mod contact;

pub use client::ClientIdentifier;
pub use contact::{
    ContactField, ContactSubmission, MESSAGE_MAX_LENGTH, MESSAGE_MIN_LENGTH, NAME_MAX_LENGTH,
    NAME_MIN_LENGTH, SubmissionId, is_valid_email_shape, is_valid_message, is_valid_name,
};
