//! [`SmtpNotifier`]: the SMTP implementation of [`Notifier`].

use std::sync::Arc;

use lettre::{
  AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
  message::Mailbox, transport::smtp::authentication::Credentials,
};
use tracing::{debug, info};
use uuid::Uuid;

use journey_core::{notify::Notifier, store::TripStore, trip::Trip};

use crate::{Error, MailConfig, Result, message};

type Transport = AsyncSmtpTransport<Tokio1Executor>;

/// Sends trip e-mails through an SMTP relay, or only logs them when delivery
/// is disabled.
pub struct SmtpNotifier<S> {
  store:     Arc<S>,
  from:      Mailbox,
  base_url:  String,
  transport: Option<Transport>,
}

impl<S: TripStore> SmtpNotifier<S> {
  /// Validates the sender address and prepares the transport. No connection
  /// is opened until the first message goes out.
  pub fn new(store: Arc<S>, config: &MailConfig) -> Result<Self> {
    let transport = if config.enabled { Some(transport(config)?) } else { None };
    Ok(Self {
      store,
      from: config.from.parse()?,
      base_url: config.base_url.clone(),
      transport,
    })
  }

  async fn trip(&self, trip_id: Uuid) -> Result<Trip> {
    self
      .store
      .get_trip(trip_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::TripNotFound(trip_id))
  }

  async fn deliver(&self, message: Message) -> Result<()> {
    let to = message
      .envelope()
      .to()
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join(", ");

    match &self.transport {
      Some(transport) => {
        transport.send(message).await?;
        info!(%to, "email sent");
      }
      None => {
        info!(%to, "mail delivery disabled; email not sent");
        debug!(body = %String::from_utf8_lossy(&message.formatted()), "undelivered email");
      }
    }
    Ok(())
  }
}

fn transport(config: &MailConfig) -> Result<Transport> {
  let mut builder = if config.starttls {
    Transport::starttls_relay(&config.host)?
  } else {
    Transport::builder_dangerous(&config.host)
  }
  .port(config.port);

  if let (Some(user), Some(pass)) = (&config.username, &config.password) {
    builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
  }

  Ok(builder.build())
}

impl<S: TripStore> Notifier for SmtpNotifier<S> {
  type Error = Error;

  async fn notify_owner_confirmation(&self, trip_id: Uuid) -> Result<()> {
    let trip = self.trip(trip_id).await?;
    let message = message::owner_confirmation(&self.from, &trip, &self.base_url)?;
    self.deliver(message).await
  }

  async fn notify_participants_invited(&self, trip_id: Uuid) -> Result<()> {
    let trip = self.trip(trip_id).await?;
    let participants = self
      .store
      .get_participants(trip_id)
      .await
      .map_err(Error::store)?;

    for message in message::invitations(&self.from, &trip, &participants)? {
      self.deliver(message).await?;
    }
    Ok(())
  }
}
