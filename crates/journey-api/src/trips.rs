//! Handlers for `/trips` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/trips` | Body: [`NewTrip`]; returns 201 + `{"trip_id"}` |
//! | `GET`  | `/trips/:trip_id` | 404 if not found |
//! | `PUT`  | `/trips/:trip_id` | Body: [`TripChanges`]; returns 204 |
//! | `GET`  | `/trips/:trip_id/confirm` | Confirms and sends invitations; 204 |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use journey_core::{
  notify::Notifier,
  store::TripStore,
  trip::{NewTrip, Trip, TripChanges},
};
use serde::Serialize;
use uuid::Uuid;

use crate::{Engine, error::ApiError};

#[derive(Debug, Serialize)]
pub struct Created {
  pub trip_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TripBody {
  pub trip: Trip,
}

/// `POST /trips`
pub async fn create<S, N>(
  State(engine): State<Engine<S, N>>,
  Json(body): Json<NewTrip>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  let trip_id = engine.create_trip(body).await?;
  Ok((StatusCode::CREATED, Json(Created { trip_id })))
}

/// `GET /trips/:trip_id`
pub async fn get_one<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(trip_id): Path<Uuid>,
) -> Result<Json<TripBody>, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  let trip = engine.get_trip(trip_id).await?;
  Ok(Json(TripBody { trip }))
}

/// `PUT /trips/:trip_id`, body: `{"destination", "starts_at", "ends_at"}`
pub async fn update<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(trip_id): Path<Uuid>,
  Json(body): Json<TripChanges>,
) -> Result<StatusCode, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  engine.update_trip(trip_id, body).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /trips/:trip_id/confirm`
///
/// A `GET` so the link in the owner's confirmation e-mail works as-is.
pub async fn confirm<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(trip_id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  engine.confirm_trip(trip_id).await?;
  Ok(StatusCode::NO_CONTENT)
}
