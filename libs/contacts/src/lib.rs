//! Brevo CRM contact adapter.
//!
//! The adapter validates a contact submission locally, issues at most one `POST /contacts`
//! to the Brevo API and folds every outcome (including transport and decoding failures)
//! into a [`ContactResult`]. Nothing is ever returned as an `Err` from the public call.
pub mod client;
pub mod error;
pub mod status;
pub mod types;
pub mod validate;

pub use client::*;
pub use error::*;
pub use status::*;
pub use types::*;
pub use validate::*;
