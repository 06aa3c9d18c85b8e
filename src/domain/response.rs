//! Response normalization and failure classification.
//!
//! Two failure tiers exist: the transport never produced a response
//! (connection refused, timeout, ...) or BPJS answered but the in-band
//! `metadata.code` says the call failed. Both end up as the same
//! [`ApiError`] shape, so callers only branch on `Ok`/`Err`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Decoded JSON object as returned by BPJS.
pub type JsonMap = serde_json::Map<String, Value>;

/// Outcome of every client and service call.
pub type ApiResult = Result<JsonMap, ApiError>;

/// Message used when a 503 comes back from the transport.
pub const SERVICE_UNAVAILABLE: &str = "Service Unavailable";
/// Message used when a failing response carries no `metadata.message`.
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response";
/// Message used when a success body has no `status`/`metadata` envelope.
pub const INVALID_RESPONSE: &str = "Invalid response from BPJS";
/// Status reported for transport failures without an HTTP status.
pub const DEFAULT_FAILURE_STATUS: u16 = 500;

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input rejected before any network call.
    Validation,
    /// No usable HTTP exchange took place.
    Transport,
    /// BPJS answered, but the in-band status is a failure.
    Application,
}

/// Structured failure returned instead of a response body.
///
/// Serializes to the public contract `{"error": true, "message": ..,
/// "code": ..}` with `code` omitted when unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    code: Option<i64>,
}

impl ApiError {
    /// Input validation failure (never carries a code).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            code: None,
        }
    }

    /// Transport failure with the best-known HTTP status.
    pub fn transport(message: impl Into<String>, code: i64) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            code: Some(code),
        }
    }

    /// In-band failure reported by the API.
    pub fn application(message: impl Into<String>, code: Option<i64>) -> Self {
        Self {
            kind: ErrorKind::Application,
            message: message.into(),
            code,
        }
    }

    /// Success body without the expected envelope.
    pub fn invalid_response() -> Self {
        Self::application(INVALID_RESPONSE, None)
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> Option<i64> {
        self.code
    }

    /// Render as the `{error, message, code?}` mapping.
    pub fn to_json(&self) -> Value {
        let mut map = JsonMap::new();
        map.insert("error".to_string(), Value::Bool(true));
        map.insert("message".to_string(), Value::String(self.message.clone()));
        if let Some(code) = self.code {
            map.insert("code".to_string(), Value::from(code));
        }
        Value::Object(map)
    }
}

impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.code.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("error", &true)?;
        map.serialize_entry("message", &self.message)?;
        if let Some(code) = self.code {
            map.serialize_entry("code", &code)?;
        }
        map.end()
    }
}

/// Collapse an [`ApiResult`] into the mapping callers branch on.
pub trait ApiResultExt {
    /// Success body verbatim, or the error mapping.
    fn into_json(self) -> Value;
}

impl ApiResultExt for ApiResult {
    fn into_json(self) -> Value {
        match self {
            Ok(body) => Value::Object(body),
            Err(err) => err.to_json(),
        }
    }
}

/// Decode a response body into a mapping.
///
/// Empty, malformed or non-object bodies decode to an empty mapping
/// rather than failing the call.
pub fn decode_body(body: &str) -> JsonMap {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => JsonMap::new(),
    }
}

/// Read `metadata.code` when it holds an integer.
///
/// Accepts JSON integers and strings such as `"201"`; anything else is
/// ignored so the HTTP status is used instead.
pub fn metadata_code(body: &JsonMap) -> Option<i64> {
    match body.get("metadata")?.get("code")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn metadata_message(body: &JsonMap) -> Option<&str> {
    body.get("metadata")?.get("message")?.as_str()
}

/// Status used for success/failure branching.
pub fn effective_status(body: &JsonMap, http_status: u16) -> i64 {
    metadata_code(body).unwrap_or_else(|| i64::from(http_status))
}

/// Classify a received HTTP response.
///
/// Only 200 and 201 count as success; the decoded body is returned
/// unchanged, with no envelope unwrapping. An HTTP 503 without a valid
/// `metadata.code` is reported as "Service Unavailable".
pub fn classify_response(http_status: u16, body: &str) -> ApiResult {
    let decoded = decode_body(body);
    let code = effective_status(&decoded, http_status);

    if matches!(code, 200 | 201) {
        return Ok(decoded);
    }

    let message = if http_status == 503 && metadata_code(&decoded).is_none() {
        SERVICE_UNAVAILABLE
    } else {
        metadata_message(&decoded).unwrap_or(UNEXPECTED_RESPONSE)
    };
    Err(ApiError::application(message, Some(code)))
}

/// Classify a failure where no usable response was received.
pub fn classify_transport_failure(status: Option<u16>, message: &str) -> ApiError {
    let status = status.unwrap_or(DEFAULT_FAILURE_STATUS);
    let message = if status == 503 { SERVICE_UNAVAILABLE } else { message };
    ApiError::transport(message, i64::from(status))
}

/// Require the `status`/`metadata` envelope.
///
/// Anything else, core failures included, becomes
/// "Invalid response from BPJS".
pub fn require_envelope(result: ApiResult) -> ApiResult {
    match result {
        Ok(body) if body.contains_key("status") || body.contains_key("metadata") => Ok(body),
        Ok(_) | Err(_) => Err(ApiError::invalid_response()),
    }
}
