//! Input checks applied by the lifecycle engine before touching the store.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;
use validator::ValidateEmail as _;

use crate::trip::Trip;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{0} must not be empty")]
  Empty(&'static str),

  #[error("invalid e-mail address: {0:?}")]
  InvalidEmail(String),

  #[error("e-mail address listed more than once: {0:?}")]
  DuplicateEmail(String),

  #[error("no e-mail addresses to invite")]
  NoInvitees,

  #[error("invalid url {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("trip ends at {ends_at} before it starts at {starts_at}")]
  EndsBeforeStarts {
    starts_at: DateTime<Utc>,
    ends_at:   DateTime<Utc>,
  },

  #[error("activity at {occurs_at} falls outside the trip ({starts_at} to {ends_at})")]
  OutsideTrip {
    occurs_at: DateTime<Utc>,
    starts_at: DateTime<Utc>,
    ends_at:   DateTime<Utc>,
  },
}

type Result<T = (), E = ValidationError> = std::result::Result<T, E>;

pub fn not_empty(field: &'static str, value: &str) -> Result {
  if value.trim().is_empty() {
    return Err(ValidationError::Empty(field));
  }
  Ok(())
}

pub fn email(address: &str) -> Result {
  if !address.validate_email() {
    return Err(ValidationError::InvalidEmail(address.to_owned()));
  }
  Ok(())
}

/// Reports the first address that appears twice. Comparison is exact, the
/// same as the participants' uniqueness constraint.
pub fn distinct<'a>(addresses: impl IntoIterator<Item = &'a str>) -> Result {
  let mut seen = HashSet::new();
  for address in addresses {
    if !seen.insert(address) {
      return Err(ValidationError::DuplicateEmail(address.to_owned()));
    }
  }
  Ok(())
}

/// A non-empty list of well-formed, distinct addresses.
pub fn invitees(addresses: &[String]) -> Result {
  if addresses.is_empty() {
    return Err(ValidationError::NoInvitees);
  }
  addresses.iter().try_for_each(|a| email(a))?;
  distinct(addresses.iter().map(String::as_str))
}

/// An absolute URL; relative references have no base to resolve against.
pub fn url(raw: &str) -> Result {
  url::Url::parse(raw)
    .map(|_| ())
    .map_err(|e| ValidationError::InvalidUrl {
      url:    raw.to_owned(),
      reason: e.to_string(),
    })
}

pub fn date_range(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result {
  if ends_at < starts_at {
    return Err(ValidationError::EndsBeforeStarts { starts_at, ends_at });
  }
  Ok(())
}

pub fn within_trip(trip: &Trip, occurs_at: DateTime<Utc>) -> Result {
  if !trip.covers(occurs_at) {
    return Err(ValidationError::OutsideTrip {
      occurs_at,
      starts_at: trip.starts_at,
      ends_at: trip.ends_at,
    });
  }
  Ok(())
}
