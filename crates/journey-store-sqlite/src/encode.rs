//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with nanosecond precision.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use journey_core::{
  activity::Activity, link::Link, participant::Participant, trip::Trip,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `trips` row.
pub struct RawTrip {
  pub trip_id:      String,
  pub destination:  String,
  pub owner_name:   String,
  pub owner_email:  String,
  pub starts_at:    String,
  pub ends_at:      String,
  pub is_confirmed: bool,
}

impl RawTrip {
  pub const COLUMNS: &'static str =
    "trip_id, destination, owner_name, owner_email, starts_at, ends_at, is_confirmed";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      trip_id:      row.get(0)?,
      destination:  row.get(1)?,
      owner_name:   row.get(2)?,
      owner_email:  row.get(3)?,
      starts_at:    row.get(4)?,
      ends_at:      row.get(5)?,
      is_confirmed: row.get(6)?,
    })
  }

  pub fn into_trip(self) -> Result<Trip> {
    Ok(Trip {
      id:           decode_uuid(&self.trip_id)?,
      destination:  self.destination,
      owner_name:   self.owner_name,
      owner_email:  self.owner_email,
      starts_at:    decode_dt(&self.starts_at)?,
      ends_at:      decode_dt(&self.ends_at)?,
      is_confirmed: self.is_confirmed,
    })
  }
}

/// Raw values read directly from a `participants` row.
pub struct RawParticipant {
  pub participant_id: String,
  pub trip_id:        String,
  pub email:          String,
  pub is_confirmed:   bool,
  pub is_owner:       bool,
}

impl RawParticipant {
  pub const COLUMNS: &'static str =
    "participant_id, trip_id, email, is_confirmed, is_owner";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      participant_id: row.get(0)?,
      trip_id:        row.get(1)?,
      email:          row.get(2)?,
      is_confirmed:   row.get(3)?,
      is_owner:       row.get(4)?,
    })
  }

  pub fn into_participant(self) -> Result<Participant> {
    Ok(Participant {
      id:           decode_uuid(&self.participant_id)?,
      trip_id:      decode_uuid(&self.trip_id)?,
      email:        self.email,
      is_confirmed: self.is_confirmed,
      is_owner:     self.is_owner,
    })
  }
}

/// Raw values read directly from an `activities` row.
pub struct RawActivity {
  pub activity_id: String,
  pub trip_id:     String,
  pub title:       String,
  pub occurs_at:   String,
}

impl RawActivity {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      activity_id: row.get(0)?,
      trip_id:     row.get(1)?,
      title:       row.get(2)?,
      occurs_at:   row.get(3)?,
    })
  }

  pub fn into_activity(self) -> Result<Activity> {
    Ok(Activity {
      id:        decode_uuid(&self.activity_id)?,
      trip_id:   decode_uuid(&self.trip_id)?,
      title:     self.title,
      occurs_at: decode_dt(&self.occurs_at)?,
    })
  }
}

/// Raw values read directly from a `links` row.
pub struct RawLink {
  pub link_id: String,
  pub trip_id: String,
  pub title:   String,
  pub url:     String,
}

impl RawLink {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      link_id: row.get(0)?,
      trip_id: row.get(1)?,
      title:   row.get(2)?,
      url:     row.get(3)?,
    })
  }

  pub fn into_link(self) -> Result<Link> {
    Ok(Link {
      id:      decode_uuid(&self.link_id)?,
      trip_id: decode_uuid(&self.trip_id)?,
      title:   self.title,
      url:     self.url,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn encoded_timestamps_sort_chronologically() {
    let a = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap();
    let b = a + chrono::Duration::milliseconds(500);
    let c = a + chrono::Duration::hours(30);
    let mut encoded = vec![encode_dt(c), encode_dt(a), encode_dt(b)];
    encoded.sort();
    assert_eq!(encoded, vec![encode_dt(a), encode_dt(b), encode_dt(c)]);
  }

  #[test]
  fn timestamp_roundtrip_keeps_nanos() {
    let t = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap()
      + chrono::Duration::nanoseconds(123_456_789);
    assert_eq!(encode_dt(t), "2025-07-01T09:00:00.123456789Z");
    assert_eq!(decode_dt(&encode_dt(t)).unwrap(), t);
  }
}
