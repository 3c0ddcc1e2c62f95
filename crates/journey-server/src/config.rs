//! Server configuration: a TOML file layered under `JOURNEY_*` environment
//! variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use ::config::{
  Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState,
};
use journey_core::{EngineConfig, itinerary::GroupingPolicy};
use journey_mailer::MailConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  /// Deadline for a whole request; the handler is dropped when it passes.
  pub request_timeout_secs: u64,
  /// Upper bound on each background notification.
  pub notify_timeout_secs:  u64,
  pub grouping:             GroupingPolicy,
  pub mail:                 MailConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "127.0.0.1".into(),
      port:                 8080,
      store_path:           PathBuf::from("journey.db"),
      request_timeout_secs: 30,
      notify_timeout_secs:  30,
      grouping:             GroupingPolicy::default(),
      mail:                 MailConfig::default(),
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists), then apply `JOURNEY_*` overrides.
  ///
  /// Nested keys use a double underscore: `JOURNEY_MAIL__HOST`.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::build(Config::builder().add_source(File::from(path).required(false)))
  }

  fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
    builder
      .add_source(
        Environment::with_prefix("JOURNEY")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn request_timeout(&self) -> Duration { Duration::from_secs(self.request_timeout_secs) }

  pub fn engine(&self) -> EngineConfig {
    EngineConfig {
      grouping:       self.grouping,
      notify_timeout: Duration::from_secs(self.notify_timeout_secs),
    }
  }
}
