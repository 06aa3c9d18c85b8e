//! BPJS request signature — HMAC-SHA256 over `consId&timestamp`.
//!
//! Every request to the BPJS web services carries the consumer id, the
//! UNIX timestamp used for signing, the signature itself and the user
//! key. The signature only proves possession of the secret key; it does
//! not cover the method, path or body.

use std::fmt;

use base64::Engine;
use serde::Deserialize;

/// Header carrying the consumer id.
pub const HEADER_CONS_ID: &str = "X-cons-id";
/// Header carrying the signing timestamp (UNIX seconds, UTC).
pub const HEADER_TIMESTAMP: &str = "X-Timestamp";
/// Header carrying the base64 HMAC signature.
pub const HEADER_SIGNATURE: &str = "X-Signature";
/// Header carrying the per-product user key.
pub const HEADER_USER_KEY: &str = "user_key";
/// Fixed content negotiation header.
pub const HEADER_ACCEPT: &str = "Accept";
/// Value sent in the `Accept` header.
pub const ACCEPT_JSON: &str = "application/json";

/// Shared secret used as the HMAC key.
///
/// Opaque bytes as far as signing is concerned. `Debug` never prints
/// the value so configs and clients can be logged safely.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw key bytes for HMAC.
    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

impl From<&str> for SecretKey {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for SecretKey {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

/// Compute `base64(HMAC-SHA256(secret, consumer_id + "&" + timestamp))`.
///
/// The secret is NEVER sent anywhere — only the computed signature.
pub fn sign(consumer_id: &str, secret_key: &[u8], timestamp: i64) -> String {
    let message = format!("{consumer_id}&{timestamp}");
    let mac = hmac_sha256::HMAC::mac(message.as_bytes(), secret_key);
    base64::engine::general_purpose::STANDARD.encode(mac)
}

/// Authentication headers for a single request.
///
/// Built fresh for each call so the timestamp never goes stale on a
/// long-lived client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    consumer_id: String,
    timestamp: i64,
    signature: String,
    user_key: String,
}

impl SignedHeaders {
    /// Build the header set for the given timestamp.
    ///
    /// Pure: the same inputs always produce byte-identical signatures.
    pub fn compute(consumer_id: &str, secret_key: &[u8], timestamp: i64, user_key: &str) -> Self {
        Self {
            consumer_id: consumer_id.to_string(),
            timestamp,
            signature: sign(consumer_id, secret_key, timestamp),
            user_key: user_key.to_string(),
        }
    }

    pub fn consumer_id(&self) -> &str {
        &self.consumer_id
    }

    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn user_key(&self) -> &str {
        &self.user_key
    }

    /// Header name/value pairs in wire order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            (HEADER_CONS_ID.to_string(), self.consumer_id.clone()),
            (HEADER_TIMESTAMP.to_string(), self.timestamp.to_string()),
            (HEADER_SIGNATURE.to_string(), self.signature.clone()),
            (HEADER_USER_KEY.to_string(), self.user_key.clone()),
            (HEADER_ACCEPT.to_string(), ACCEPT_JSON.to_string()),
        ]
    }
}
