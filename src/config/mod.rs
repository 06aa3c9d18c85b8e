//! Configuration Module - TOML-based Client Configuration
//!
//! Loads and validates configuration from `config.toml` with
//! environment variable overrides. Credentials live in named
//! deployment profiles (`development`, `production`); `env` selects
//! which one the client is built from. Unknown keys are rejected.

pub mod loader;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::adapters::api::auth::Credentials;
use crate::adapters::api::client::ClientConfig;
use crate::domain::SecretKey;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// Config file could not be read.
  #[error("failed to read config file {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },
  /// TOML was malformed or carried unknown keys.
  #[error("failed to parse config: {0}")]
  Parse(#[from] toml::de::Error),
  /// `env` / `BPJS_ENV` named no known profile.
  #[error("unknown environment profile: {0}")]
  UnknownProfile(String),
  /// A required field resolved to an empty value.
  #[error("{0} must not be empty")]
  MissingField(&'static str),
  /// A field held an out-of-range value.
  #[error("invalid {field}: {reason}")]
  Invalid { field: &'static str, reason: String },
  /// HTTP client construction failed.
  #[error("failed to build HTTP client: {0}")]
  HttpClient(String),
}

/// Deployment profile selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
  #[default]
  Development,
  Production,
}

impl Environment {
  /// Prefix used by the per-profile environment overrides.
  pub const fn env_prefix(self) -> &'static str {
    match self {
      Self::Development => "BPJS_DEV",
      Self::Production => "BPJS_PROD",
    }
  }
}

impl FromStr for Environment {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "development" | "dev" => Ok(Self::Development),
      "production" | "prod" => Ok(Self::Production),
      other => Err(ConfigError::UnknownProfile(other.to_string())),
    }
  }
}

impl fmt::Display for Environment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Development => f.write_str("development"),
      Self::Production => f.write_str("production"),
    }
  }
}

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  #[default]
  Text,
  Json,
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
  /// Active profile.
  #[serde(default)]
  pub env: Environment,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Log output format.
  #[serde(default)]
  pub log_format: LogFormat,
  /// Per-request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  /// Development credentials.
  #[serde(default)]
  pub development: ProfileConfig,
  /// Production credentials.
  #[serde(default)]
  pub production: ProfileConfig,
}

/// Credentials and endpoint for one deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
  /// API host, e.g. `https://apijkn.bpjs-kesehatan.go.id`.
  #[serde(default)]
  pub base_url: String,
  /// Product path segment, e.g. `antreanrs`.
  #[serde(default = "default_service_name")]
  pub service_name: String,
  /// Consumer id issued by BPJS.
  #[serde(default)]
  pub cons_id: String,
  /// HMAC secret.
  #[serde(default)]
  pub secret_key: SecretKey,
  /// User key for the antrean product.
  #[serde(default)]
  pub user_key: String,
}

impl Default for ProfileConfig {
  fn default() -> Self {
    Self {
      base_url: String::new(),
      service_name: default_service_name(),
      cons_id: String::new(),
      secret_key: SecretKey::default(),
      user_key: String::new(),
    }
  }
}

impl AppConfig {
  /// The profile selected by `env`.
  pub const fn active_profile(&self) -> &ProfileConfig {
    match self.env {
      Environment::Development => &self.development,
      Environment::Production => &self.production,
    }
  }

  pub(crate) fn profile_mut(&mut self, env: Environment) -> &mut ProfileConfig {
    match env {
      Environment::Development => &mut self.development,
      Environment::Production => &mut self.production,
    }
  }

  /// Credentials for the active profile.
  pub fn credentials(&self) -> Credentials {
    let profile = self.active_profile();
    Credentials {
      consumer_id: profile.cons_id.clone(),
      secret_key: profile.secret_key.clone(),
      user_key: profile.user_key.clone(),
      base_url: profile.base_url.clone(),
      service_name: profile.service_name.clone(),
    }
  }

  /// Request settings for the signed client.
  pub const fn client_config(&self) -> ClientConfig {
    ClientConfig {
      timeout: Duration::from_secs(self.timeout_seconds),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

const fn default_timeout() -> u64 {
  30
}

fn default_service_name() -> String {
  "antreanrs".to_string()
}
