//! HTTP client for API smoke testing
//!
//! Wraps reqwest with a fixed per-request timeout and classifies transport failures.

use anyhow::{Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method,
};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use crate::models::HttpMethod;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection failed to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read response body: {0}")]
    BodyRead(String),
}

/// HTTP client for testing
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_headers: HeaderMap,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create client with the given per-request timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client,
            default_headers,
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Send HTTP request
    pub async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, HttpError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| HttpError::InvalidUrl(format!("{}: {e}", request.url)))?;
        debug!("Sending {} request to {}", request.method, url);

        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut req_builder = self
            .client
            .request(method, url)
            .headers(self.default_headers.clone());

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let start = Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                HttpError::Connect {
                    url: request.url.clone(),
                    reason: root_cause(&e),
                }
            } else {
                HttpError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(self.timeout_secs)
            } else {
                HttpError::BodyRead(e.to_string())
            }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            body,
            duration_ms,
        })
    }
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach a JSON body
    pub fn json(self, value: &serde_json::Value) -> Self {
        self.body(value.to_string())
    }
}

/// HTTP response
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    /// First `max_chars` characters of the body
    pub fn preview(&self, max_chars: usize) -> String {
        truncate(&self.body, max_chars)
    }
}

/// Innermost message of an error chain, e.g. the OS or resolver error
/// behind reqwest's generic "error sending request"
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/// Cut `s` to at most `max_chars` characters, never splitting a code point
pub fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
