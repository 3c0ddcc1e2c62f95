//! Handlers for participant endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `POST`  | `/trips/:trip_id/invites` | Body: `{"email"}` or `{"emails":[...]}`; 201 + `{"invited"}` |
//! | `GET`   | `/trips/:trip_id/participants` | Owner included |
//! | `PATCH` | `/participants/:participant_id/confirm` | 204; 409 if already confirmed |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use journey_core::{notify::Notifier, participant::Participant, store::TripStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Engine, error::ApiError};

// ─── Invite ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InviteBody {
  One { email: String },
  Many { emails: Vec<String> },
}

impl InviteBody {
  fn into_emails(self) -> Vec<String> {
    match self {
      Self::One { email } => vec![email],
      Self::Many { emails } => emails,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct Invited {
  pub invited: usize,
}

/// `POST /trips/:trip_id/invites`
pub async fn invite<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(trip_id): Path<Uuid>,
  Json(body): Json<InviteBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  let invited = engine
    .invite_participants(trip_id, body.into_emails())
    .await?;
  Ok((StatusCode::CREATED, Json(Invited { invited })))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParticipantList {
  pub participants: Vec<Participant>,
}

/// `GET /trips/:trip_id/participants`
pub async fn list<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(trip_id): Path<Uuid>,
) -> Result<Json<ParticipantList>, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  let participants = engine.participants(trip_id).await?;
  Ok(Json(ParticipantList { participants }))
}

// ─── Confirm ──────────────────────────────────────────────────────────────────

/// `PATCH /participants/:participant_id/confirm`
pub async fn confirm<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(participant_id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  engine.confirm_participant(participant_id).await?;
  Ok(StatusCode::NO_CONTENT)
}
