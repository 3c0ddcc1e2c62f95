//! Handlers for `/trips/:trip_id/activities`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/trips/:trip_id/activities` | Itinerary grouped by day |
//! | `POST` | `/trips/:trip_id/activities` | Body: `{"title", "occurs_at"}`; 201 + `{"activity_id"}` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use journey_core::{
  activity::NewActivity, itinerary::DayGroup, notify::Notifier, store::TripStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{Engine, error::ApiError};

#[derive(Debug, Serialize)]
pub struct Itinerary {
  pub activities: Vec<DayGroup>,
}

#[derive(Debug, Serialize)]
pub struct Created {
  pub activity_id: Uuid,
}

/// `GET /trips/:trip_id/activities`
pub async fn list<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(trip_id): Path<Uuid>,
) -> Result<Json<Itinerary>, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  let activities = engine.itinerary(trip_id).await?;
  Ok(Json(Itinerary { activities }))
}

/// `POST /trips/:trip_id/activities`
pub async fn create<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(trip_id): Path<Uuid>,
  Json(body): Json<NewActivity>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  let activity_id = engine.create_activity(trip_id, body).await?;
  Ok((StatusCode::CREATED, Json(Created { activity_id })))
}
