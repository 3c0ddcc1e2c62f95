//! [`SqliteStore`]: the SQLite implementation of [`TripStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use journey_core::{
  activity::{Activity, NewActivity},
  link::{Link, NewLink},
  participant::Participant,
  store::{TripStore, UnitOfWork},
  trip::{NewTrip, Trip, TripUpdate},
};

use crate::{
  Error, Result,
  encode::{
    RawActivity, RawLink, RawParticipant, RawTrip, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Journey trip store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// A participant row waiting for its unit of work to commit.
struct StagedInvite {
  participant_id: String,
  trip_id:        String,
  email:          String,
  is_owner:       bool,
}

impl StagedInvite {
  fn new(trip_id: Uuid, email: &str, is_owner: bool) -> Self {
    Self {
      participant_id: encode_uuid(Uuid::new_v4()),
      trip_id: encode_uuid(trip_id),
      email: email.to_owned(),
      is_owner,
    }
  }
}

fn insert_participants(
  conn: &rusqlite::Connection,
  rows: &[StagedInvite],
) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare(
    "INSERT INTO participants (participant_id, trip_id, email, is_confirmed, is_owner)
     VALUES (?1, ?2, ?3, ?4, ?4)",
  )?;
  for row in rows {
    // The owner is the only participant created already confirmed.
    stmt.execute(rusqlite::params![
      row.participant_id,
      row.trip_id,
      row.email,
      row.is_owner,
    ])?;
  }
  Ok(())
}

// ─── Unit of work ────────────────────────────────────────────────────────────

/// Invitations staged in memory and written in one SQLite transaction on
/// [`commit`](UnitOfWork::commit).
///
/// Nothing touches the database before commit, so dropping the unit of work
/// (including when its future is cancelled) leaves no trace.
pub struct SqliteUnitOfWork {
  conn:   tokio_rusqlite::Connection,
  staged: Vec<StagedInvite>,
}

impl UnitOfWork for SqliteUnitOfWork {
  type Error = Error;

  async fn invite(&mut self, trip_id: Uuid, emails: &[String]) -> Result<()> {
    self
      .staged
      .extend(emails.iter().map(|email| StagedInvite::new(trip_id, email, false)));
    Ok(())
  }

  async fn commit(self) -> Result<()> {
    let Self { conn, staged } = self;
    if staged.is_empty() {
      return Ok(());
    }

    conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        insert_participants(&tx, &staged)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn rollback(self) -> Result<()> { Ok(()) }
}

// ─── TripStore impl ──────────────────────────────────────────────────────────

impl TripStore for SqliteStore {
  type Error = Error;
  type UnitOfWork = SqliteUnitOfWork;

  // ── Trips ─────────────────────────────────────────────────────────────────

  async fn get_trip(&self, id: Uuid) -> Result<Option<Trip>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawTrip> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {} FROM trips WHERE trip_id = ?1", RawTrip::COLUMNS),
            rusqlite::params![id_str],
            RawTrip::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawTrip::into_trip).transpose()
  }

  async fn create_trip(&self, input: NewTrip) -> Result<Uuid> {
    let trip_id = Uuid::new_v4();

    let id_str        = encode_uuid(trip_id);
    let starts_at_str = encode_dt(input.starts_at);
    let ends_at_str   = encode_dt(input.ends_at);

    let mut participants = Vec::with_capacity(input.emails_to_invite.len() + 1);
    participants.push(StagedInvite::new(trip_id, &input.owner_email, true));
    participants.extend(
      input
        .emails_to_invite
        .iter()
        .map(|email| StagedInvite::new(trip_id, email, false)),
    );

    let NewTrip { destination, owner_name, owner_email, .. } = input;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO trips (
             trip_id, destination, owner_name, owner_email,
             starts_at, ends_at, is_confirmed
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
          rusqlite::params![
            id_str,
            destination,
            owner_name,
            owner_email,
            starts_at_str,
            ends_at_str,
          ],
        )?;
        insert_participants(&tx, &participants)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(trip_id)
  }

  async fn update_trip(&self, id: Uuid, update: TripUpdate) -> Result<()> {
    let id_str        = encode_uuid(id);
    let starts_at_str = encode_dt(update.starts_at);
    let ends_at_str   = encode_dt(update.ends_at);
    let destination   = update.destination;
    let is_confirmed  = update.is_confirmed;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE trips
           SET destination  = ?2,
               starts_at    = ?3,
               ends_at      = ?4,
               is_confirmed = MAX(is_confirmed, ?5)
           WHERE trip_id = ?1",
          rusqlite::params![id_str, destination, starts_at_str, ends_at_str, is_confirmed],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::TripNotFound(id));
    }
    Ok(())
  }

  // ── Participants ──────────────────────────────────────────────────────────

  async fn get_participant(&self, id: Uuid) -> Result<Option<Participant>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawParticipant> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {} FROM participants WHERE participant_id = ?1",
              RawParticipant::COLUMNS
            ),
            rusqlite::params![id_str],
            RawParticipant::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawParticipant::into_participant).transpose()
  }

  async fn confirm_participant(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE participants SET is_confirmed = 1
           WHERE participant_id = ?1 AND is_confirmed = 0",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed == 1)
  }

  async fn get_participants(&self, trip_id: Uuid) -> Result<Vec<Participant>> {
    let trip_id_str = encode_uuid(trip_id);

    let raws: Vec<RawParticipant> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM participants WHERE trip_id = ?1
           ORDER BY is_owner DESC, rowid",
          RawParticipant::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![trip_id_str], RawParticipant::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawParticipant::into_participant).collect()
  }

  async fn begin(&self) -> Result<SqliteUnitOfWork> {
    Ok(SqliteUnitOfWork { conn: self.conn.clone(), staged: Vec::new() })
  }

  // ── Activities ────────────────────────────────────────────────────────────

  async fn get_trip_activities(&self, trip_id: Uuid) -> Result<Vec<Activity>> {
    let trip_id_str = encode_uuid(trip_id);

    let raws: Vec<RawActivity> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT activity_id, trip_id, title, occurs_at FROM activities
           WHERE trip_id = ?1
           ORDER BY occurs_at, rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![trip_id_str], RawActivity::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawActivity::into_activity).collect()
  }

  async fn create_activity(&self, trip_id: Uuid, input: NewActivity) -> Result<Uuid> {
    let activity_id = Uuid::new_v4();

    let id_str      = encode_uuid(activity_id);
    let trip_id_str = encode_uuid(trip_id);
    let at_str      = encode_dt(input.occurs_at);
    let title       = input.title;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO activities (activity_id, trip_id, title, occurs_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, trip_id_str, title, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(activity_id)
  }

  // ── Links ─────────────────────────────────────────────────────────────────

  async fn get_trip_links(&self, trip_id: Uuid) -> Result<Vec<Link>> {
    let trip_id_str = encode_uuid(trip_id);

    let raws: Vec<RawLink> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT link_id, trip_id, title, url FROM links
           WHERE trip_id = ?1
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![trip_id_str], RawLink::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLink::into_link).collect()
  }

  async fn create_link(&self, trip_id: Uuid, input: NewLink) -> Result<Uuid> {
    let link_id = Uuid::new_v4();

    let id_str      = encode_uuid(link_id);
    let trip_id_str = encode_uuid(trip_id);
    let NewLink { title, url } = input;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO links (link_id, trip_id, title, url) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, trip_id_str, title, url],
        )?;
        Ok(())
      })
      .await?;

    Ok(link_id)
  }
}

#[cfg(test)]
impl SqliteStore {
  pub(crate) async fn row_count(&self, table: &'static str) -> i64 {
    self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
      })
      .await
      .expect("row count")
  }
}
