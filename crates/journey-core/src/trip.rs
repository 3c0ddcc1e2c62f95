//! Trip: the envelope that owns participants, activities and links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A planned journey with a date window, owned by one person.
///
/// `is_confirmed` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
  pub id:           Uuid,
  pub destination:  String,
  pub owner_name:   String,
  pub owner_email:  String,
  pub starts_at:    DateTime<Utc>,
  pub ends_at:      DateTime<Utc>,
  pub is_confirmed: bool,
}

impl Trip {
  /// Whether `at` falls inside `[starts_at, ends_at]`.
  pub fn covers(&self, at: DateTime<Utc>) -> bool {
    self.starts_at <= at && at <= self.ends_at
  }
}

/// Input for [`TripStore::create_trip`](crate::store::TripStore::create_trip).
///
/// The owner is recorded as a confirmed participant; every address in
/// `emails_to_invite` becomes an unconfirmed one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrip {
  pub destination:      String,
  pub owner_name:       String,
  pub owner_email:      String,
  pub starts_at:        DateTime<Utc>,
  pub ends_at:          DateTime<Utc>,
  #[serde(default)]
  pub emails_to_invite: Vec<String>,
}

/// The user-editable part of a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripChanges {
  pub destination: String,
  pub starts_at:   DateTime<Utc>,
  pub ends_at:     DateTime<Utc>,
}

/// Full row update handed to the gateway.
///
/// Stores must not let `is_confirmed` go from `true` back to `false`.
#[derive(Debug, Clone)]
pub struct TripUpdate {
  pub destination:  String,
  pub starts_at:    DateTime<Utc>,
  pub ends_at:      DateTime<Utc>,
  pub is_confirmed: bool,
}

impl TripUpdate {
  /// Apply `changes` on top of `trip`, keeping its confirmation state.
  pub fn from_changes(trip: &Trip, changes: TripChanges) -> Self {
    Self {
      destination:  changes.destination,
      starts_at:    changes.starts_at,
      ends_at:      changes.ends_at,
      is_confirmed: trip.is_confirmed,
    }
  }

  /// The same update with the confirmation flag set.
  pub fn confirmed(trip: &Trip) -> Self {
    Self {
      destination:  trip.destination.clone(),
      starts_at:    trip.starts_at,
      ends_at:      trip.ends_at,
      is_confirmed: true,
    }
  }
}
