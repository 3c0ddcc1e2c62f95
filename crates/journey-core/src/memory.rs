//! In-memory `TripStore` and notifiers for engine tests.

use std::{
  collections::HashMap,
  sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
  activity::{Activity, NewActivity},
  link::{Link, NewLink},
  notify::{Notification, Notifier},
  participant::Participant,
  store::{TripStore, UnitOfWork},
  trip::{NewTrip, Trip, TripUpdate},
};

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
  #[error("injected failure")]
  Injected,
  #[error("participant {0:?} already on trip")]
  Duplicate(String),
  #[error("unknown trip {0}")]
  UnknownTrip(Uuid),
}

#[derive(Default)]
struct State {
  trips:        HashMap<Uuid, Trip>,
  participants: Vec<Participant>,
  activities:   Vec<Activity>,
  links:        Vec<Link>,
}

#[derive(Default)]
struct Shared {
  state:          Mutex<State>,
  /// Every gateway call, for "never reached the store" assertions.
  calls:          AtomicUsize,
  rollbacks:      AtomicUsize,
  /// Fail while staging the n-th (1-based) invitation of a batch.
  fail_invite_at: Mutex<Option<usize>>,
  fail_commit:    AtomicBool,
  hang_commit:    AtomicBool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
  shared: Arc<Shared>,
}

impl MemoryStore {
  pub fn calls(&self) -> usize { self.shared.calls.load(Ordering::SeqCst) }

  pub fn rollbacks(&self) -> usize { self.shared.rollbacks.load(Ordering::SeqCst) }

  pub fn fail_invite_at(&self, n: usize) {
    *self.shared.fail_invite_at.lock().unwrap() = Some(n);
  }

  pub fn fail_commit(&self) { self.shared.fail_commit.store(true, Ordering::SeqCst); }

  pub fn hang_commit(&self) { self.shared.hang_commit.store(true, Ordering::SeqCst); }

  /// Emails on a trip, straight from state (does not count as a call).
  pub fn emails(&self, trip_id: Uuid) -> Vec<String> {
    self
      .shared
      .state
      .lock()
      .unwrap()
      .participants
      .iter()
      .filter(|p| p.trip_id == trip_id)
      .map(|p| p.email.clone())
      .collect()
  }

  pub fn insert_activity(&self, activity: Activity) {
    self.shared.state.lock().unwrap().activities.push(activity);
  }

  fn touch(&self) { self.shared.calls.fetch_add(1, Ordering::SeqCst); }

  fn lock(&self) -> std::sync::MutexGuard<'_, State> { self.shared.state.lock().unwrap() }
}

fn participant(trip_id: Uuid, email: &str, is_owner: bool) -> Participant {
  Participant {
    id: Uuid::new_v4(),
    trip_id,
    email: email.to_owned(),
    is_confirmed: is_owner,
    is_owner,
  }
}

// ─── Unit of work ────────────────────────────────────────────────────────────

pub struct MemoryUnitOfWork {
  shared:    Arc<Shared>,
  staged:    Vec<Participant>,
  committed: bool,
}

impl UnitOfWork for MemoryUnitOfWork {
  type Error = MemoryError;

  async fn invite(&mut self, trip_id: Uuid, emails: &[String]) -> Result<(), MemoryError> {
    let fail_at = *self.shared.fail_invite_at.lock().unwrap();
    for (i, email) in emails.iter().enumerate() {
      if fail_at == Some(i + 1) {
        return Err(MemoryError::Injected);
      }
      let taken = {
        let state = self.shared.state.lock().unwrap();
        if !state.trips.contains_key(&trip_id) {
          return Err(MemoryError::UnknownTrip(trip_id));
        }
        state
          .participants
          .iter()
          .chain(self.staged.iter())
          .any(|p| p.trip_id == trip_id && &p.email == email)
      };
      if taken {
        return Err(MemoryError::Duplicate(email.clone()));
      }
      self.staged.push(participant(trip_id, email, false));
    }
    Ok(())
  }

  async fn commit(mut self) -> Result<(), MemoryError> {
    if self.shared.hang_commit.load(Ordering::SeqCst) {
      std::future::pending::<()>().await;
    }
    if self.shared.fail_commit.load(Ordering::SeqCst) {
      return Err(MemoryError::Injected);
    }
    let staged = std::mem::take(&mut self.staged);
    self.shared.state.lock().unwrap().participants.extend(staged);
    self.committed = true;
    Ok(())
  }

  async fn rollback(self) -> Result<(), MemoryError> { Ok(()) }
}

impl Drop for MemoryUnitOfWork {
  fn drop(&mut self) {
    if !self.committed {
      self.shared.rollbacks.fetch_add(1, Ordering::SeqCst);
    }
  }
}

// ─── TripStore impl ──────────────────────────────────────────────────────────

impl TripStore for MemoryStore {
  type Error = MemoryError;
  type UnitOfWork = MemoryUnitOfWork;

  async fn get_trip(&self, id: Uuid) -> Result<Option<Trip>, MemoryError> {
    self.touch();
    Ok(self.lock().trips.get(&id).cloned())
  }

  async fn create_trip(&self, input: NewTrip) -> Result<Uuid, MemoryError> {
    self.touch();
    let id = Uuid::new_v4();
    let mut state = self.lock();
    state.participants.push(participant(id, &input.owner_email, true));
    for email in &input.emails_to_invite {
      state.participants.push(participant(id, email, false));
    }
    state.trips.insert(id, Trip {
      id,
      destination: input.destination,
      owner_name: input.owner_name,
      owner_email: input.owner_email,
      starts_at: input.starts_at,
      ends_at: input.ends_at,
      is_confirmed: false,
    });
    Ok(id)
  }

  async fn update_trip(&self, id: Uuid, update: TripUpdate) -> Result<(), MemoryError> {
    self.touch();
    let mut state = self.lock();
    let trip = state.trips.get_mut(&id).ok_or(MemoryError::UnknownTrip(id))?;
    trip.destination = update.destination;
    trip.starts_at = update.starts_at;
    trip.ends_at = update.ends_at;
    trip.is_confirmed |= update.is_confirmed;
    Ok(())
  }

  async fn get_participant(&self, id: Uuid) -> Result<Option<Participant>, MemoryError> {
    self.touch();
    Ok(self.lock().participants.iter().find(|p| p.id == id).cloned())
  }

  async fn confirm_participant(&self, id: Uuid) -> Result<bool, MemoryError> {
    self.touch();
    let mut state = self.lock();
    match state.participants.iter_mut().find(|p| p.id == id) {
      Some(p) if !p.is_confirmed => {
        p.is_confirmed = true;
        Ok(true)
      }
      _ => Ok(false),
    }
  }

  async fn get_participants(&self, trip_id: Uuid) -> Result<Vec<Participant>, MemoryError> {
    self.touch();
    Ok(
      self
        .lock()
        .participants
        .iter()
        .filter(|p| p.trip_id == trip_id)
        .cloned()
        .collect(),
    )
  }

  async fn begin(&self) -> Result<MemoryUnitOfWork, MemoryError> {
    self.touch();
    Ok(MemoryUnitOfWork {
      shared:    Arc::clone(&self.shared),
      staged:    Vec::new(),
      committed: false,
    })
  }

  async fn get_trip_activities(&self, trip_id: Uuid) -> Result<Vec<Activity>, MemoryError> {
    self.touch();
    Ok(
      self
        .lock()
        .activities
        .iter()
        .filter(|a| a.trip_id == trip_id)
        .cloned()
        .collect(),
    )
  }

  async fn create_activity(
    &self,
    trip_id: Uuid,
    input: NewActivity,
  ) -> Result<Uuid, MemoryError> {
    self.touch();
    let id = Uuid::new_v4();
    self.lock().activities.push(Activity {
      id,
      trip_id,
      title: input.title,
      occurs_at: input.occurs_at,
    });
    Ok(id)
  }

  async fn get_trip_links(&self, trip_id: Uuid) -> Result<Vec<Link>, MemoryError> {
    self.touch();
    Ok(
      self
        .lock()
        .links
        .iter()
        .filter(|l| l.trip_id == trip_id)
        .cloned()
        .collect(),
    )
  }

  async fn create_link(&self, trip_id: Uuid, input: NewLink) -> Result<Uuid, MemoryError> {
    self.touch();
    let id = Uuid::new_v4();
    self.lock().links.push(Link { id, trip_id, title: input.title, url: input.url });
    Ok(id)
  }
}

// ─── Notifiers ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("mail transport unavailable")]
pub struct TransportDown;

/// Reports every dispatch on a channel; optionally fails each one.
pub struct RecordingNotifier {
  tx:   mpsc::UnboundedSender<(Notification, Uuid)>,
  fail: bool,
}

impl RecordingNotifier {
  pub fn new(fail: bool) -> (Self, mpsc::UnboundedReceiver<(Notification, Uuid)>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Self { tx, fail }, rx)
  }

  fn record(&self, n: Notification, trip_id: Uuid) -> Result<(), TransportDown> {
    let _ = self.tx.send((n, trip_id));
    if self.fail { Err(TransportDown) } else { Ok(()) }
  }
}

impl Notifier for RecordingNotifier {
  type Error = TransportDown;

  async fn notify_owner_confirmation(&self, trip_id: Uuid) -> Result<(), TransportDown> {
    self.record(Notification::OwnerConfirmation, trip_id)
  }

  async fn notify_participants_invited(&self, trip_id: Uuid) -> Result<(), TransportDown> {
    self.record(Notification::ParticipantsInvited, trip_id)
  }
}
