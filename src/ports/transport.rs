//! HTTP Transport Port - Single Request Execution
//!
//! The signed client builds a fully-resolved request (URL, headers,
//! optional JSON body, timeout) and hands it to a transport. Any HTTP
//! response, including 4xx/5xx, comes back as `Ok`; only a failure to
//! obtain a response is an `Err`.
//!
//! Key design decisions:
//! - No retries at this layer (callers see every failure)
//! - Body returned as raw text; decoding belongs to the client
//! - Status code on errors is best-effort (`None` when unknown)

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// HTTP verbs used by the BPJS services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Delete,
}

impl HttpMethod {
  /// Upper-case wire name.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
      Self::Put => "PUT",
      Self::Delete => "DELETE",
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Fully-resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
  /// HTTP method.
  pub method: HttpMethod,
  /// Absolute URL.
  pub url: String,
  /// Header name/value pairs, in send order.
  pub headers: Vec<(String, String)>,
  /// JSON body, sent with `Content-Type: application/json`.
  pub body: Option<Value>,
  /// Per-request timeout.
  pub timeout: Duration,
}

impl TransportRequest {
  /// First header value with the given name (case-insensitive).
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(key, _)| key.eq_ignore_ascii_case(name))
      .map(|(_, value)| value.as_str())
  }
}

/// Any HTTP response that made it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
  /// HTTP status code.
  pub status: u16,
  /// Raw response body.
  pub body: String,
}

impl TransportResponse {
  pub fn new(status: u16, body: impl Into<String>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }
}

/// No usable response (connect error, timeout, malformed request).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
  /// Human-readable failure text.
  pub message: String,
  /// HTTP status attached to the failure, when known.
  pub status: Option<u16>,
}

impl TransportError {
  pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
    Self {
      message: message.into(),
      status,
    }
  }
}

/// Trait for HTTP transports.
///
/// Implementors issue exactly one request per call and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
  /// Execute the request and return whatever the server answered.
  ///
  /// # Errors
  /// Returns `TransportError` only when no response was received.
  async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
