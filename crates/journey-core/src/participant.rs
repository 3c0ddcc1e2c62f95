//! Participants: people attached to a trip by e-mail address.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person invited to (or owning) a trip.
///
/// `(trip_id, email)` is unique per store. `is_confirmed` only ever moves from
/// `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
  pub id:           Uuid,
  pub trip_id:      Uuid,
  pub email:        String,
  pub is_confirmed: bool,
  pub is_owner:     bool,
}
