//! Signed API Client - Authenticated BPJS REST Client
//!
//! Builds `{base_url}/{service_name}/{endpoint}`, signs each request
//! with fresh headers, sends it through an `HttpTransport` and folds
//! both transport failures and in-band failures into `ApiError`.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::auth::{BpjsAuth, Credentials};
use super::transport::ReqwestTransport;
use crate::config::ConfigError;
use crate::domain::response::{classify_response, classify_transport_failure};
use crate::domain::{ApiResult, JsonMap};
use crate::ports::clock::Clock;
use crate::ports::transport::{HttpMethod, HttpTransport, TransportRequest};

/// Request settings for the signed client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
  /// Per-request timeout.
  pub timeout: Duration,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(30),
    }
  }
}

/// HMAC-signed client for one BPJS product.
///
/// Holds no mutable state, so one instance can be shared behind an
/// `Arc` by every service.
pub struct SignedApiClient {
  /// Underlying transport.
  transport: Arc<dyn HttpTransport>,
  /// Credential set + clock.
  auth: BpjsAuth,
  /// Client configuration.
  config: ClientConfig,
}

impl SignedApiClient {
  /// Create a client backed by `reqwest`.
  ///
  /// # Errors
  /// Fails on empty credentials or if the HTTP client cannot be built.
  pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, ConfigError> {
    let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
    Self::with_transport(credentials, config, transport)
  }

  /// Create a client over an injected transport.
  ///
  /// # Errors
  /// Fails on empty credentials.
  pub fn with_transport(
    credentials: Credentials,
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
  ) -> Result<Self, ConfigError> {
    Ok(Self {
      transport,
      auth: BpjsAuth::new(credentials)?,
      config,
    })
  }

  /// Replace the signing clock.
  #[must_use]
  pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.auth = self.auth.with_clock(clock);
    self
  }

  /// Absolute URL for an endpoint. Slashes are not normalized.
  pub fn url_for(&self, endpoint: &str) -> String {
    let creds = self.auth.credentials();
    format!("{}/{}/{}", creds.base_url, creds.service_name, endpoint)
  }

  /// GET `endpoint`.
  pub async fn get(&self, endpoint: &str) -> ApiResult {
    self.send_request(HttpMethod::Get, endpoint, None).await
  }

  /// POST `payload` as JSON to `endpoint`.
  pub async fn post(&self, endpoint: &str, payload: &JsonMap) -> ApiResult {
    self.send_request(HttpMethod::Post, endpoint, Some(payload)).await
  }

  /// PUT `payload` as JSON to `endpoint`.
  pub async fn put(&self, endpoint: &str, payload: &JsonMap) -> ApiResult {
    self.send_request(HttpMethod::Put, endpoint, Some(payload)).await
  }

  /// DELETE `endpoint`, optionally with a JSON body.
  pub async fn delete(&self, endpoint: &str, payload: Option<&JsonMap>) -> ApiResult {
    self.send_request(HttpMethod::Delete, endpoint, payload).await
  }

  /// Sign, send and normalize one request.
  ///
  /// Success is the decoded body, verbatim. Every failure is returned
  /// as an `ApiError` value; nothing is retried.
  pub async fn send_request(
    &self,
    method: HttpMethod,
    endpoint: &str,
    payload: Option<&JsonMap>,
  ) -> ApiResult {
    let request = TransportRequest {
      method,
      url: self.url_for(endpoint),
      headers: self.auth.headers().to_pairs(),
      body: payload
        .filter(|p| !p.is_empty())
        .map(|p| Value::Object(p.clone())),
      timeout: self.config.timeout,
    };

    match self.transport.execute(request).await {
      Ok(response) => {
        let result = classify_response(response.status, &response.body);
        match &result {
          Ok(_) => debug!(%method, endpoint, status = response.status, "BPJS request succeeded"),
          Err(e) => warn!(
            %method,
            endpoint,
            http_status = response.status,
            code = ?e.code(),
            reason = e.message(),
            "BPJS returned failure"
          ),
        }
        result
      }
      Err(e) => {
        warn!(%method, endpoint, status = ?e.status, error = %e, "BPJS request failed");
        Err(classify_transport_failure(e.status, &e.message))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::domain::{ErrorKind, SecretKey};
  use crate::ports::clock::FixedClock;
  use crate::ports::transport::{MockHttpTransport, TransportError, TransportResponse};

  fn credentials() -> Credentials {
    Credentials {
      consumer_id: "123456".to_string(),
      secret_key: SecretKey::new("my-secret-key"),
      user_key: "my-user-key".to_string(),
      base_url: "https://apijkn.bpjs-kesehatan.go.id".to_string(),
      service_name: "vclaim".to_string(),
    }
  }

  fn client(mock: MockHttpTransport) -> SignedApiClient {
    SignedApiClient::with_transport(credentials(), ClientConfig::default(), Arc::new(mock))
      .unwrap()
      .with_clock(Arc::new(FixedClock(1_700_000_000)))
  }

  #[test]
  fn test_url_composition() {
    let client = client(MockHttpTransport::new());
    assert_eq!(
      client.url_for("ref/poli"),
      "https://apijkn.bpjs-kesehatan.go.id/vclaim/ref/poli"
    );
    assert_eq!(
      client.url_for("/ref/poli"),
      "https://apijkn.bpjs-kesehatan.go.id/vclaim//ref/poli"
    );
  }

  #[tokio::test]
  async fn test_get_sends_signed_headers() {
    let mut mock = MockHttpTransport::new();
    mock
      .expect_execute()
      .withf(|req| {
        req.method == HttpMethod::Get
          && req.url == "https://apijkn.bpjs-kesehatan.go.id/vclaim/ref/poli"
          && req.header("X-cons-id") == Some("123456")
          && req.header("X-Timestamp") == Some("1700000000")
          && req.header("X-Signature") == Some("y5icuMtNcJoAyODiM9+FYNW14RjM2ogsvl4b9CF3Wnc=")
          && req.header("user_key") == Some("my-user-key")
          && req.header("Accept") == Some("application/json")
          && req.body.is_none()
          && req.timeout == Duration::from_secs(30)
      })
      .times(1)
      .returning(|_| {
        Ok(TransportResponse::new(
          200,
          r#"{"status":200,"data":{"poli":"Umum"}}"#,
        ))
      });

    let body = client(mock).get("ref/poli").await.unwrap();
    assert_eq!(Value::Object(body), json!({"status": 200, "data": {"poli": "Umum"}}));
  }

  #[tokio::test]
  async fn test_post_sends_json_body() {
    let mut mock = MockHttpTransport::new();
    mock
      .expect_execute()
      .withf(|req| {
        req.method == HttpMethod::Post && req.body == Some(json!({"noKartu": "000123456789"}))
      })
      .times(1)
      .returning(|_| Ok(TransportResponse::new(201, r#"{"status":201,"message":"Created"}"#)));

    let payload = json!({"noKartu": "000123456789"});
    let body = client(mock)
      .post("sep", payload.as_object().unwrap())
      .await
      .unwrap();
    assert_eq!(body["status"], 201);
  }

  #[tokio::test]
  async fn test_delete_without_payload_sends_no_body() {
    let mut mock = MockHttpTransport::new();
    mock
      .expect_execute()
      .withf(|req| req.method == HttpMethod::Delete && req.body.is_none())
      .times(1)
      .returning(|_| Ok(TransportResponse::new(200, r#"{"metadata":{"code":200}}"#)));

    assert!(client(mock).delete("antrean/1", None).await.is_ok());
  }

  #[tokio::test]
  async fn test_transport_failure_becomes_error_500() {
    let mut mock = MockHttpTransport::new();
    mock
      .expect_execute()
      .returning(|_| Err(TransportError::new("Network error", None)));

    let err = client(mock).get("ref/poli").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.message(), "Network error");
    assert_eq!(err.code(), Some(500));
  }

  #[tokio::test]
  async fn test_in_band_failure() {
    let mut mock = MockHttpTransport::new();
    mock.expect_execute().returning(|_| {
      Ok(TransportResponse::new(
        200,
        r#"{"metadata":{"code":201,"message":"Ok."}}"#,
      ))
    });
    assert!(client(mock).get("ref/poli").await.is_ok());

    let mut mock = MockHttpTransport::new();
    mock.expect_execute().returning(|_| {
      Ok(TransportResponse::new(
        200,
        r#"{"metadata":{"code":208,"message":"Antrean tidak ditemukan"}}"#,
      ))
    });
    let err = client(mock).get("antrean/pendaftaran/aktif").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(err.code(), Some(208));
    assert_eq!(err.message(), "Antrean tidak ditemukan");
  }
}
