//! Client for the portfolio contact endpoint.
//!
//! Runs the same field rules as the server before anything is sent so the
//! form can give immediate feedback. The server validates again; nothing
//! here is a trust boundary.

#![forbid(unsafe_code)]

mod client;
mod draft;
mod outcome;

pub use client::{CONTACT_PATH, ContactClient};
pub use draft::{ClientFeedback, ContactDraft, precheck};
pub use outcome::{ContactOutcome, ContactResponseBody, interpret_response};
