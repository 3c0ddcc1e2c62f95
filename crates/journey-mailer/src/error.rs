//! Error type for `journey-mailer`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The trip store failed while resolving recipients.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("trip not found: {0}")]
  TripNotFound(uuid::Uuid),

  /// A sender or recipient address could not be parsed.
  #[error("email address parse error: {0}")]
  Address(#[from] lettre::address::AddressError),

  /// The MIME message could not be assembled.
  #[error("email build error: {0}")]
  Build(#[from] lettre::error::Error),

  /// SMTP transport-level failure (connection, authentication, rejection).
  #[error("SMTP transport error: {0}")]
  Transport(#[from] lettre::transport::smtp::Error),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
