//! SMTP settings, deserialised from the `[mail]` table of the server config.

use serde::Deserialize;

/// Delivery settings for [`SmtpNotifier`](crate::SmtpNotifier).
///
/// The defaults target a local mail catcher (e.g. mailpit) on port 1025
/// without TLS, and leave delivery switched off.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
  /// When `false`, messages are built and logged but never sent.
  pub enabled:  bool,
  pub host:     String,
  pub port:     u16,
  /// RFC 5322 "From" address.
  pub from:     String,
  /// Upgrade the connection with STARTTLS. Plain SMTP otherwise.
  pub starttls: bool,
  pub username: Option<String>,
  pub password: Option<String>,
  /// Prefix for the confirmation link in owner e-mails.
  pub base_url: String,
}

impl Default for MailConfig {
  fn default() -> Self {
    Self {
      enabled:  false,
      host:     "localhost".into(),
      port:     1025,
      from:     "trips@journey.local".into(),
      starttls: false,
      username: None,
      password: None,
      base_url: "http://localhost:8080".into(),
    }
  }
}
