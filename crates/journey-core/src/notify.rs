//! The `Notifier` trait and fire-and-forget dispatch.
//!
//! Notifications are never awaited by the operation that triggers them. A
//! failed or timed-out delivery is logged from the background task and goes
//! nowhere else.

use std::{fmt, future::Future, sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{debug, error};
use uuid::Uuid;

/// Delivers trip e-mails. Implementations look up whatever they need (owner
/// address, roster) from the trip id alone.
pub trait Notifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Ask the trip owner to confirm a freshly created trip.
  fn notify_owner_confirmation(
    &self,
    trip_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Invite every participant of a confirmed trip.
  fn notify_participants_invited(
    &self,
    trip_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
  OwnerConfirmation,
  ParticipantsInvited,
}

impl fmt::Display for Notification {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::OwnerConfirmation => f.write_str("owner_confirmation"),
      Self::ParticipantsInvited => f.write_str("participants_invited"),
    }
  }
}

/// Spawn a detached task delivering `notification` for `trip_id`.
///
/// The task gives up after `timeout` and never retries. Callers are free to
/// drop the returned handle.
pub(crate) fn dispatch<N>(
  notifier: Arc<N>,
  notification: Notification,
  trip_id: Uuid,
  timeout: Duration,
) -> JoinHandle<()>
where
  N: Notifier + 'static,
{
  tokio::spawn(async move {
    let send = async {
      match notification {
        Notification::OwnerConfirmation => {
          notifier.notify_owner_confirmation(trip_id).await
        }
        Notification::ParticipantsInvited => {
          notifier.notify_participants_invited(trip_id).await
        }
      }
    };

    match tokio::time::timeout(timeout, send).await {
      Ok(Ok(())) => debug!(%trip_id, %notification, "notification delivered"),
      Ok(Err(e)) => {
        error!(%trip_id, %notification, error = %e, "notification failed")
      }
      Err(_) => error!(
        %trip_id,
        %notification,
        timeout_ms = timeout.as_millis() as u64,
        "notification timed out"
      ),
    }
  })
}
