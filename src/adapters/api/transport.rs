//! Reqwest Transport - `HttpTransport` over rustls reqwest
//!
//! Sends exactly one request per call. Any status code the server
//! returns is handed back as a response; only connect, timeout and
//! request-building failures become `TransportError`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;

use crate::config::ConfigError;
use crate::ports::transport::{
    HttpMethod, HttpTransport, TransportError, TransportRequest, TransportResponse,
};

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build a transport with a default timeout.
    ///
    /// Each request still carries its own timeout from the client.
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { http })
    }
}

const fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn to_transport_error(err: &reqwest::Error) -> TransportError {
    TransportError::new(err.to_string(), err.status().map(|s| s.as_u16()))
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .http
            .request(to_reqwest_method(request.method), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| to_transport_error(&e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| to_transport_error(&e))?;

        debug!(status, bytes = body.len(), "HTTP response received");

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Put), Method::PUT);
        assert_eq!(to_reqwest_method(HttpMethod::Delete), Method::DELETE);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let request = TransportRequest {
            method: HttpMethod::Get,
            url: "http://127.0.0.1:9/antreanrs/ref/poli".to_string(),
            headers: Vec::new(),
            body: None,
            timeout: Duration::from_secs(2),
        };

        let err = transport.execute(request).await.unwrap_err();
        assert!(err.status.is_none());
        assert!(!err.message.is_empty());
    }
}
