//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use journey_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// A transactional write failed and left nothing behind; safe to retry.
  #[error("unavailable: {0}")]
  Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<journey_core::Error> for ApiError {
  fn from(e: journey_core::Error) -> Self {
    match e.kind() {
      ErrorKind::NotFound => Self::NotFound(e.to_string()),
      ErrorKind::ValidationFailed => Self::BadRequest(e.to_string()),
      ErrorKind::AlreadyConfirmed | ErrorKind::AlreadyInvited => {
        Self::Conflict(e.to_string())
      }
      ErrorKind::TransactionFailed => Self::Unavailable(Box::new(e)),
      ErrorKind::Store => Self::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Unavailable(e) => {
        tracing::warn!(error = %e, "transactional write failed");
        (
          StatusCode::SERVICE_UNAVAILABLE,
          "the change could not be saved and nothing was written; try again".to_owned(),
        )
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
