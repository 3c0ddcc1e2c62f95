//! Activities: dated events on a trip's itinerary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
  pub id:        Uuid,
  pub trip_id:   Uuid,
  pub title:     String,
  pub occurs_at: DateTime<Utc>,
}

/// Input for [`TripStore::create_activity`](crate::store::TripStore::create_activity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
  pub title:     String,
  pub occurs_at: DateTime<Utc>,
}
