//! BPJS Authentication — Per-Request HMAC-SHA256 Headers
//!
//! Holds the credential set for one deployment and signs every request
//! with a fresh timestamp. Headers are never cached on the client, so a
//! long-lived instance keeps producing valid signatures and can be
//! shared across tasks without locking.

use std::sync::Arc;

use crate::config::ConfigError;
use crate::domain::{SecretKey, SignedHeaders};
use crate::ports::clock::{Clock, SystemClock};

/// Credentials and endpoint for the BPJS web service.
///
/// Immutable once handed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Consumer id (`X-cons-id`).
    pub consumer_id: String,
    /// HMAC secret (never sent in headers).
    pub secret_key: SecretKey,
    /// Product user key (`user_key`).
    pub user_key: String,
    /// API host without trailing path.
    pub base_url: String,
    /// Product path segment, e.g. `antreanrs`.
    pub service_name: String,
}

impl Credentials {
    /// Check that every field needed to sign and route a call is set.
    ///
    /// # Errors
    /// `ConfigError::MissingField` naming the first empty field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("base_url"));
        }
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::MissingField("service_name"));
        }
        if self.consumer_id.trim().is_empty() {
            return Err(ConfigError::MissingField("cons_id"));
        }
        if self.secret_key.is_empty() {
            return Err(ConfigError::MissingField("secret_key"));
        }
        if self.user_key.trim().is_empty() {
            return Err(ConfigError::MissingField("user_key"));
        }
        Ok(())
    }
}

/// Signs BPJS requests.
pub struct BpjsAuth {
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl BpjsAuth {
    /// Validate credentials and sign with the system clock.
    ///
    /// # Errors
    /// Fails if any credential field is empty.
    pub fn new(credentials: Credentials) -> Result<Self, ConfigError> {
        credentials.validate()?;
        Ok(Self {
            credentials,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build headers for a request about to be sent.
    pub fn headers(&self) -> SignedHeaders {
        self.headers_at(self.clock.unix_timestamp())
    }

    /// Build headers for an explicit timestamp.
    pub fn headers_at(&self, timestamp: i64) -> SignedHeaders {
        SignedHeaders::compute(
            &self.credentials.consumer_id,
            self.credentials.secret_key.expose(),
            timestamp,
            &self.credentials.user_key,
        )
    }
}
