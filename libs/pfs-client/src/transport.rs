//! Transport boundary.
//!
//! The session hands a fully-formed request (URL, method, headers, body) to a
//! [`Transport`] and gets back the status line and raw body bytes. Header
//! construction, including authorization, happens before this point.

use std::time::Duration;

use reqwest::Method;
use tracing::Level;

use crate::{PfsError, SessionConfig};

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

/// Executes one request and waits for its complete response.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, PfsError>;
}

/// Blocking `reqwest` transport.
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(inner: reqwest::blocking::Client) -> Self {
        Self { inner }
    }

    /// Build a client honouring `timeout_sec` (0 means no timeout).
    pub fn from_config(config: &SessionConfig) -> Result<Self, PfsError> {
        let mut builder = reqwest::blocking::Client::builder();
        if config.timeout_sec > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_sec));
        }
        let inner = builder
            .build()
            .map_err(|e| PfsError::transport(None, format!("failed to build HTTP client: {e}")))?;
        Ok(Self::new(inner))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(reqwest::blocking::Client::new())
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, PfsError> {
        let span = tracing::span!(
            Level::INFO, "outgoing_http",
            http.method = %request.method,
            http.url = %request.url,
            http.status_code = tracing::field::Empty,
        );
        let _g = span.enter();

        let mut builder = self.inner.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .map_err(|e| PfsError::transport(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        span.record("http.status_code", status.as_u16());

        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response
            .bytes()
            .map_err(|e| PfsError::transport(Some(status.as_u16()), e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_sends_headers_and_returns_body() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET)
                .path("/odata/THING")
                .header("Accept", "application/json");
            then.status(200).body(r#"{"value": []}"#);
        });

        let transport = ReqwestTransport::default();
        let request = HttpRequest::get(server.url("/odata/THING")).header("Accept", "application/json");
        let response = transport.send(&request).unwrap();

        m.assert();
        assert_eq!(response.status, 200);
        assert_eq!(response.reason, "OK");
        assert_eq!(response.body, br#"{"value": []}"#.to_vec());
    }

    #[test]
    fn test_error_status_is_returned_not_raised() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("nope");
        });

        let response = ReqwestTransport::default()
            .send(&HttpRequest::get(server.url("/missing")))
            .unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(response.reason, "Not Found");
    }

    #[test]
    fn test_connection_failure_has_no_status() {
        // Port 9 (discard) is not expected to be listening on loopback.
        let err = ReqwestTransport::default()
            .send(&HttpRequest::get("http://127.0.0.1:9/odata/"))
            .unwrap_err();
        assert!(matches!(err, PfsError::Transport { status: None, .. }));
    }

    #[test]
    fn test_from_config_with_timeout() {
        let cfg = SessionConfig {
            timeout_sec: 5,
            ..SessionConfig::default()
        };
        assert!(ReqwestTransport::from_config(&cfg).is_ok());
    }
}
