//! Error types for `journey-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::validate::ValidationError;

/// A boxed collaborator error (gateway or unit of work).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("trip not found: {0}")]
  TripNotFound(Uuid),

  #[error("participant not found: {0}")]
  ParticipantNotFound(Uuid),

  #[error("participant {0} is already confirmed")]
  AlreadyConfirmed(Uuid),

  #[error("{email} is already invited to trip {trip_id}")]
  AlreadyInvited { trip_id: Uuid, email: String },

  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  /// The invitation unit of work could not be applied; nothing was written.
  #[error("transaction failed: {0}")]
  TransactionFailed(#[source] BoxError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}

/// The coarse category of an [`Error`], for callers that map errors to
/// user-facing outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  AlreadyConfirmed,
  AlreadyInvited,
  ValidationFailed,
  TransactionFailed,
  Store,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::TripNotFound(_) | Self::ParticipantNotFound(_) => ErrorKind::NotFound,
      Self::AlreadyConfirmed(_) => ErrorKind::AlreadyConfirmed,
      Self::AlreadyInvited { .. } => ErrorKind::AlreadyInvited,
      Self::Validation(_) => ErrorKind::ValidationFailed,
      Self::TransactionFailed(_) => ErrorKind::TransactionFailed,
      Self::Store(_) => ErrorKind::Store,
    }
  }

  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub(crate) fn transaction<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::TransactionFailed(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
