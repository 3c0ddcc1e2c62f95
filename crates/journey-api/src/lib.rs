//! JSON REST API for Journey.
//!
//! Exposes an axum [`Router`] backed by a [`TripEngine`] over any
//! [`journey_core::store::TripStore`] and [`journey_core::notify::Notifier`].
//! TLS, timeouts and request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = journey_api::api_router(Arc::new(engine)).layer(TraceLayer::new_for_http());
//! ```

pub mod activities;
pub mod error;
pub mod links;
pub mod participants;
pub mod trips;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use journey_core::{TripEngine, notify::Notifier, store::TripStore};

pub use error::ApiError;

/// Shared handler state.
pub type Engine<S, N> = Arc<TripEngine<S, N>>;

/// Build a fully-materialised API router for `engine`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, N>(engine: Engine<S, N>) -> Router<()>
where
  S: TripStore + 'static,
  N: Notifier + 'static,
{
  Router::new()
    // Trips
    .route("/trips", post(trips::create::<S, N>))
    .route("/trips/{trip_id}", get(trips::get_one::<S, N>).put(trips::update::<S, N>))
    .route("/trips/{trip_id}/confirm", get(trips::confirm::<S, N>))
    // Participants
    .route("/trips/{trip_id}/invites", post(participants::invite::<S, N>))
    .route("/trips/{trip_id}/participants", get(participants::list::<S, N>))
    .route(
      "/participants/{participant_id}/confirm",
      patch(participants::confirm::<S, N>),
    )
    // Activities
    .route(
      "/trips/{trip_id}/activities",
      get(activities::list::<S, N>).post(activities::create::<S, N>),
    )
    // Links
    .route(
      "/trips/{trip_id}/links",
      get(links::list::<S, N>).post(links::create::<S, N>),
    )
    .with_state(engine)
}
