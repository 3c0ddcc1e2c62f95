//! Core types, collaborator traits and trip lifecycle logic for Journey.
//!
//! This crate is deliberately free of HTTP, SMTP and database dependencies.
//! Storage and mail delivery are reached only through the [`store::TripStore`]
//! and [`notify::Notifier`] traits.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod activity;
pub mod error;
pub mod itinerary;
pub mod lifecycle;
pub mod link;
pub mod notify;
pub mod participant;
pub mod store;
pub mod trip;
pub mod validate;

pub use error::{Error, ErrorKind, Result};
pub use lifecycle::{EngineConfig, TripEngine};

#[cfg(test)]
mod memory;
