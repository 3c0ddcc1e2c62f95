//! The `TripStore` gateway trait and its transactional `UnitOfWork`.
//!
//! The traits are implemented by storage backends (e.g.
//! `journey-store-sqlite`). The lifecycle engine depends on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  activity::{Activity, NewActivity},
  link::{Link, NewLink},
  participant::Participant,
  trip::{NewTrip, Trip, TripUpdate},
};

// ─── Unit of work ────────────────────────────────────────────────────────────

/// An all-or-nothing batch of writes obtained from [`TripStore::begin`].
///
/// Nothing staged on a unit of work is visible to readers until
/// [`commit`](UnitOfWork::commit) succeeds. Dropping a unit of work without
/// committing it is equivalent to [`rollback`](UnitOfWork::rollback); this is
/// what happens when the owning future is cancelled.
pub trait UnitOfWork: Send {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Stage one participant row per address in `emails` for `trip_id`.
  fn invite<'a>(
    &'a mut self,
    trip_id: Uuid,
    emails: &'a [String],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Apply every staged write atomically. On error nothing is applied.
  fn commit(self) -> impl Future<Output = Result<(), Self::Error>> + Send;

  /// Discard every staged write.
  fn rollback(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Journey persistence backend.
///
/// Lookups return `None` for absent rows; deciding whether absence is an
/// error belongs to the caller. All methods return `Send` futures so the
/// trait can be used in multi-threaded async runtimes.
pub trait TripStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;
  type UnitOfWork: UnitOfWork<Error = Self::Error>;

  // ── Trips ─────────────────────────────────────────────────────────────

  /// Retrieve a trip by id. Returns `None` if not found.
  fn get_trip(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Trip>, Self::Error>> + Send + '_;

  /// Persist a trip together with its owner participant and initial
  /// invitees, atomically. Returns the new trip id.
  fn create_trip(
    &self,
    input: NewTrip,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + '_;

  /// Overwrite the editable columns of a trip.
  ///
  /// Implementations keep `is_confirmed` monotonic: an update carrying
  /// `false` never clears a confirmed trip.
  fn update_trip(
    &self,
    id: Uuid,
    update: TripUpdate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Participants ──────────────────────────────────────────────────────

  /// Retrieve a participant by id. Returns `None` if not found.
  fn get_participant(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Participant>, Self::Error>> + Send + '_;

  /// Mark a participant confirmed if it is not already.
  ///
  /// Returns `true` when this call performed the transition and `false` when
  /// the participant was already confirmed (or does not exist).
  fn confirm_participant(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Every participant of `trip_id`, owner included.
  fn get_participants(
    &self,
    trip_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Participant>, Self::Error>> + Send + '_;

  /// Open a unit of work for a batch of invitations.
  fn begin(
    &self,
  ) -> impl Future<Output = Result<Self::UnitOfWork, Self::Error>> + Send + '_;

  // ── Activities ────────────────────────────────────────────────────────

  /// Activities of `trip_id`, in no particular order.
  fn get_trip_activities(
    &self,
    trip_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Activity>, Self::Error>> + Send + '_;

  fn create_activity(
    &self,
    trip_id: Uuid,
    input: NewActivity,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + '_;

  // ── Links ─────────────────────────────────────────────────────────────

  fn get_trip_links(
    &self,
    trip_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Link>, Self::Error>> + Send + '_;

  fn create_link(
    &self,
    trip_id: Uuid,
    input: NewLink,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + '_;
}
