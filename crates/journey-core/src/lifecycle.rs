//! The trip lifecycle engine.
//!
//! [`TripEngine`] owns the confirmation rules for trips and participants, the
//! transactional invitation workflow and the itinerary read model. It talks to
//! storage through [`TripStore`] and to mail delivery through [`Notifier`];
//! notifications run on detached tasks and never affect an operation's result.

use std::{iter, sync::Arc, time::Duration};

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
  Error, Result,
  activity::NewActivity,
  itinerary::{DayGroup, GroupingPolicy, group_activities},
  link::{Link, NewLink},
  notify::{self, Notification, Notifier},
  participant::Participant,
  store::{TripStore, UnitOfWork},
  trip::{NewTrip, Trip, TripChanges, TripUpdate},
  validate,
};

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EngineConfig {
  /// How [`TripEngine::itinerary`] buckets activities into days.
  pub grouping:       GroupingPolicy,
  /// Upper bound on a single background notification.
  pub notify_timeout: Duration,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      grouping:       GroupingPolicy::default(),
      notify_timeout: Duration::from_secs(30),
    }
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

pub struct TripEngine<S, N> {
  store:    Arc<S>,
  notifier: Arc<N>,
  config:   EngineConfig,
}

impl<S, N> Clone for TripEngine<S, N> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      notifier: Arc::clone(&self.notifier),
      config:   self.config.clone(),
    }
  }
}

impl<S, N> TripEngine<S, N>
where
  S: TripStore,
  N: Notifier + 'static,
{
  pub fn new(store: Arc<S>, notifier: Arc<N>, config: EngineConfig) -> Self {
    Self { store, notifier, config }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn config(&self) -> &EngineConfig { &self.config }

  // ── Trips ─────────────────────────────────────────────────────────────

  /// Create a trip with its owner and initial guest list, then ask the owner
  /// to confirm it.
  #[instrument(skip_all, fields(destination = %input.destination))]
  pub async fn create_trip(&self, input: NewTrip) -> Result<Uuid> {
    validate::not_empty("destination", &input.destination)?;
    validate::not_empty("owner_name", &input.owner_name)?;
    validate::email(&input.owner_email)?;
    validate::date_range(input.starts_at, input.ends_at)?;
    input
      .emails_to_invite
      .iter()
      .try_for_each(|e| validate::email(e))?;
    validate::distinct(
      iter::once(input.owner_email.as_str())
        .chain(input.emails_to_invite.iter().map(String::as_str)),
    )?;

    let trip_id = self.store.create_trip(input).await.map_err(Error::store)?;
    info!(%trip_id, "trip created");

    self.notify(Notification::OwnerConfirmation, trip_id);
    Ok(trip_id)
  }

  pub async fn get_trip(&self, id: Uuid) -> Result<Trip> {
    self
      .store
      .get_trip(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::TripNotFound(id))
  }

  /// Replace a trip's destination and dates. Confirmation is carried over
  /// unchanged.
  #[instrument(skip(self, changes))]
  pub async fn update_trip(&self, id: Uuid, changes: TripChanges) -> Result<()> {
    validate::not_empty("destination", &changes.destination)?;
    validate::date_range(changes.starts_at, changes.ends_at)?;

    let trip = self.get_trip(id).await?;
    self
      .store
      .update_trip(id, TripUpdate::from_changes(&trip, changes))
      .await
      .map_err(Error::store)
  }

  /// Confirm a trip and invite its participants.
  ///
  /// Confirming an already-confirmed trip is not an error; it sends the
  /// invitations again.
  ///
  /// The gateway only takes whole-row updates, so the destination and dates
  /// read here are written back with the flag. An `update_trip` that commits
  /// between that read and this write is overwritten.
  #[instrument(skip(self))]
  pub async fn confirm_trip(&self, id: Uuid) -> Result<()> {
    let trip = self.get_trip(id).await?;

    if trip.is_confirmed {
      info!(trip_id = %id, "trip already confirmed; re-sending invitations");
    } else {
      self
        .store
        .update_trip(id, TripUpdate::confirmed(&trip))
        .await
        .map_err(Error::store)?;
      info!(trip_id = %id, "trip confirmed");
    }

    self.notify(Notification::ParticipantsInvited, id);
    Ok(())
  }

  // ── Participants ──────────────────────────────────────────────────────

  #[instrument(skip(self))]
  pub async fn confirm_participant(&self, id: Uuid) -> Result<()> {
    let participant = self
      .store
      .get_participant(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ParticipantNotFound(id))?;

    if participant.is_confirmed {
      return Err(Error::AlreadyConfirmed(id));
    }

    // A concurrent confirmation may win between the read and the write.
    let transitioned = self
      .store
      .confirm_participant(id)
      .await
      .map_err(Error::store)?;
    if !transitioned {
      return Err(Error::AlreadyConfirmed(id));
    }

    info!(participant_id = %id, trip_id = %participant.trip_id, "participant confirmed");
    Ok(())
  }

  /// Add every address in `emails` to the trip, or none of them.
  ///
  /// Addresses already on the trip are rejected before the unit of work
  /// opens. A concurrent invite of the same address can still lose at commit,
  /// which surfaces as [`Error::TransactionFailed`].
  ///
  /// Returns the number of participants added.
  #[instrument(skip(self, emails), fields(count = emails.len()))]
  pub async fn invite_participants(
    &self,
    trip_id: Uuid,
    emails: Vec<String>,
  ) -> Result<usize> {
    self.get_trip(trip_id).await?;
    validate::invitees(&emails)?;

    let roster = self
      .store
      .get_participants(trip_id)
      .await
      .map_err(Error::store)?;
    if let Some(taken) = emails.iter().find(|e| roster.iter().any(|p| &p.email == *e)) {
      return Err(Error::AlreadyInvited { trip_id, email: taken.clone() });
    }

    let mut uow = self.store.begin().await.map_err(Error::transaction)?;

    let staged = uow.invite(trip_id, &emails).await;
    if let Err(e) = staged {
      warn!(%trip_id, error = %e, "invitation failed; rolling back");
      if let Err(rb) = uow.rollback().await {
        warn!(%trip_id, error = %rb, "rollback failed");
      }
      return Err(Error::transaction(e));
    }

    uow.commit().await.map_err(|e| {
      warn!(%trip_id, error = %e, "invitation commit failed");
      Error::transaction(e)
    })?;

    info!(%trip_id, count = emails.len(), "participants invited");
    Ok(emails.len())
  }

  pub async fn participants(&self, trip_id: Uuid) -> Result<Vec<Participant>> {
    self.get_trip(trip_id).await?;
    self
      .store
      .get_participants(trip_id)
      .await
      .map_err(Error::store)
  }

  // ── Activities ────────────────────────────────────────────────────────

  /// Schedule an activity inside the trip's date window.
  pub async fn create_activity(
    &self,
    trip_id: Uuid,
    input: NewActivity,
  ) -> Result<Uuid> {
    let trip = self.get_trip(trip_id).await?;
    validate::not_empty("title", &input.title)?;
    validate::within_trip(&trip, input.occurs_at)?;

    self
      .store
      .create_activity(trip_id, input)
      .await
      .map_err(Error::store)
  }

  /// The trip's activities grouped into days.
  pub async fn itinerary(&self, trip_id: Uuid) -> Result<Vec<DayGroup>> {
    self.get_trip(trip_id).await?;
    let activities = self
      .store
      .get_trip_activities(trip_id)
      .await
      .map_err(Error::store)?;
    Ok(group_activities(activities, self.config.grouping))
  }

  // ── Links ─────────────────────────────────────────────────────────────

  pub async fn create_link(&self, trip_id: Uuid, input: NewLink) -> Result<Uuid> {
    self.get_trip(trip_id).await?;
    validate::not_empty("title", &input.title)?;
    validate::url(&input.url)?;

    self
      .store
      .create_link(trip_id, input)
      .await
      .map_err(Error::store)
  }

  pub async fn links(&self, trip_id: Uuid) -> Result<Vec<Link>> {
    self.get_trip(trip_id).await?;
    self.store.get_trip_links(trip_id).await.map_err(Error::store)
  }

  // ── Helpers ───────────────────────────────────────────────────────────

  /// Fire and forget.
  fn notify(&self, notification: Notification, trip_id: Uuid) {
    let _detached = notify::dispatch(
      Arc::clone(&self.notifier),
      notification,
      trip_id,
      self.config.notify_timeout,
    );
  }
}
