//! SMTP delivery of Journey trip e-mails.
//!
//! [`SmtpNotifier`] implements [`journey_core::notify::Notifier`] on top of
//! `lettre`'s async SMTP transport. It resolves recipients through the trip
//! store, so it only ever needs a trip id.

mod config;
mod message;
mod notifier;

pub mod error;

pub use config::MailConfig;
pub use error::{Error, Result};
pub use notifier::SmtpNotifier;
