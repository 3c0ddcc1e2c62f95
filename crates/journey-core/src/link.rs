//! Links: titled reference URLs shared on a trip.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
  pub id:      Uuid,
  pub trip_id: Uuid,
  pub title:   String,
  pub url:     String,
}

/// Input for [`TripStore::create_link`](crate::store::TripStore::create_link).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLink {
  pub title: String,
  pub url:   String,
}
