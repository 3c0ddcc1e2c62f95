//! Handlers for `/trips/:trip_id/links`.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use journey_core::{
  link::{Link, NewLink},
  notify::Notifier,
  store::TripStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{Engine, error::ApiError};

#[derive(Debug, Serialize)]
pub struct LinkList {
  pub links: Vec<Link>,
}

#[derive(Debug, Serialize)]
pub struct Created {
  pub link_id: Uuid,
}

/// `GET /trips/:trip_id/links`
pub async fn list<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(trip_id): Path<Uuid>,
) -> Result<Json<LinkList>, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  let links = engine.links(trip_id).await?;
  Ok(Json(LinkList { links }))
}

/// `POST /trips/:trip_id/links`, body: `{"title", "url"}`
pub async fn create<S, N>(
  State(engine): State<Engine<S, N>>,
  Path(trip_id): Path<Uuid>,
  Json(body): Json<NewLink>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  let link_id = engine.create_link(trip_id, body).await?;
  Ok((StatusCode::CREATED, Json(Created { link_id })))
}
