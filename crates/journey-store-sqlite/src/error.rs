//! Error type for `journey-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// An update addressed a trip that does not exist.
  #[error("trip not found: {0}")]
  TripNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
