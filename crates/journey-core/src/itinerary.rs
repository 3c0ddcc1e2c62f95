//! Day-by-day itinerary views over a trip's activities.
//!
//! [`group_activities`] turns the flat activity list returned by the store
//! into ordered [`DayGroup`]s. Two policies exist:
//!
//! - [`GroupingPolicy::Adjacent`] (default) opens a new group whenever an
//!   activity's date differs from the *preceding* activity's date. It runs in
//!   O(n) and is exact for date-sorted input, but an unsorted input such as
//!   dates A, B, A yields two separate groups for A.
//! - [`GroupingPolicy::ByDate`] stable-sorts by date first, so every date
//!   appears exactly once. O(n log n).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::activity::Activity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingPolicy {
  #[default]
  Adjacent,
  ByDate,
}

/// One activity as shown inside a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryEntry {
  pub id:        Uuid,
  pub title:     String,
  pub occurs_at: DateTime<Utc>,
}

impl ItineraryEntry {
  /// The calendar day (UTC) the entry belongs to.
  pub fn date(&self) -> NaiveDate { self.occurs_at.date_naive() }
}

impl From<Activity> for ItineraryEntry {
  fn from(a: Activity) -> Self {
    Self { id: a.id, title: a.title, occurs_at: a.occurs_at }
  }
}

/// The activities of one itinerary day, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGroup {
  pub date:       NaiveDate,
  pub activities: Vec<ItineraryEntry>,
}

/// Group `activities` into days according to `policy`.
///
/// Empty input yields an empty vector.
pub fn group_activities<I>(activities: I, policy: GroupingPolicy) -> Vec<DayGroup>
where
  I: IntoIterator<Item = Activity>,
{
  let mut entries: Vec<ItineraryEntry> =
    activities.into_iter().map(ItineraryEntry::from).collect();

  if policy == GroupingPolicy::ByDate {
    // `sort_by_key` is stable: same-day entries keep their input order.
    entries.sort_by_key(ItineraryEntry::date);
  }

  group_adjacent(entries)
}

/// Single pass; each entry is compared only with its predecessor.
fn group_adjacent(entries: Vec<ItineraryEntry>) -> Vec<DayGroup> {
  let mut groups: Vec<DayGroup> = Vec::new();

  for entry in entries {
    let date = entry.date();
    match groups.last_mut() {
      Some(open) if open.date == date => open.activities.push(entry),
      _ => groups.push(DayGroup { date, activities: vec![entry] }),
    }
  }

  groups
}
