//! Plain-text message construction.

use lettre::{
  Message,
  message::{Mailbox, header::ContentType},
};

use journey_core::{participant::Participant, trip::Trip};

use crate::Result;

fn day(trip: &Trip) -> String { trip.starts_at.format("%Y-%m-%d").to_string() }

/// Ask the owner to confirm `trip`.
pub fn owner_confirmation(from: &Mailbox, trip: &Trip, base_url: &str) -> Result<Message> {
  let to = Mailbox::new(Some(trip.owner_name.clone()), trip.owner_email.parse()?);
  let link = format!("{}/trips/{}/confirm", base_url.trim_end_matches('/'), trip.id);

  let body = format!(
    "Hello, {name}!\n\n\
     Your trip to {destination} starting on {day} needs to be confirmed.\n\
     Open the link below to confirm it:\n\n\
     {link}\n",
    name = trip.owner_name,
    destination = trip.destination,
    day = day(trip),
  );

  Ok(
    Message::builder()
      .from(from.clone())
      .to(to)
      .subject("Confirm your trip")
      .header(ContentType::TEXT_PLAIN)
      .body(body)?,
  )
}

/// One invitation per non-owner participant of `trip`.
///
/// Each guest gets a separate message so addresses are not disclosed to the
/// rest of the group.
pub fn invitations(
  from: &Mailbox,
  trip: &Trip,
  participants: &[Participant],
) -> Result<Vec<Message>> {
  let body = format!(
    "Hello!\n\n\
     {owner} invited you on a trip to {destination} starting on {day}.\n\
     Confirm your place with the organiser to join in.\n",
    owner = trip.owner_name,
    destination = trip.destination,
    day = day(trip),
  );

  participants
    .iter()
    .filter(|p| !p.is_owner)
    .map(|p| -> Result<Message> {
      Ok(
        Message::builder()
          .from(from.clone())
          .to(Mailbox::new(None, p.email.parse()?))
          .subject(format!("You're invited to {}", trip.destination))
          .header(ContentType::TEXT_PLAIN)
          .body(body.clone())?,
      )
    })
    .collect()
}
