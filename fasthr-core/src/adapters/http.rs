//! FastHR API request pipeline
//!
//! Every call to the API goes through [`ApiClient::request`]. It merges the
//! default JSON content type with caller headers, attaches the bearer token,
//! and turns non-2xx responses into classified [`Error`]s. It never touches
//! session state: a 401 comes back as [`Error::Unauthorized`] and the caller
//! decides what to tear down.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::config::MAX_TIMEOUT_SECS;
use crate::domain::result::{Error, Result, GENERIC_ERROR_MESSAGE};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// One API call: built per request, never stored
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Endpoint path relative to the base URL, e.g. `/api/leaves`
    pub path: String,
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
    /// Extra headers; these win over the default content type
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn patch<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::Patch, path).with_body(body)
    }

    pub fn with_body<B: Serialize>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Blocking HTTP client for the FastHR API
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client for the given origin, e.g. `http://localhost:8000`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if parsed.host_str().unwrap_or("").is_empty() {
            return Err(Error::Config(format!(
                "API base URL '{}' has no host",
                base_url
            )));
        }

        if timeout.is_zero() || timeout > Duration::from_secs(MAX_TIMEOUT_SECS) {
            return Err(Error::Config(format!(
                "Request timeout must be between 1 and {} seconds",
                MAX_TIMEOUT_SECS
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request and decode the JSON response as `T`
    ///
    /// `token`, when present, is sent as `Authorization: Bearer <token>`.
    pub fn request<T: DeserializeOwned>(&self, request: &ApiRequest, token: Option<&str>) -> Result<T> {
        let headers = build_headers(request, token)?;

        let mut builder = self
            .client
            .request(request.method.into(), self.url_for(&request.path))
            .headers(headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().map_err(|e| self.map_request_error(e))?;
        let status = response.status();
        let body = response.text().map_err(|e| self.map_request_error(e))?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized {
                detail: error_detail(&body),
            });
        }

        if !status.is_success() {
            let message = error_detail(&body).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
            return Err(Error::request_failed(status.as_u16(), message));
        }

        parse_body(&body)
    }

    /// Map transport errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Transport(format!(
                "Connection timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            Error::Transport(format!(
                "Unable to connect to the FastHR API at {}",
                self.base_url
            ))
        } else {
            Error::Transport(format!("FastHR request failed: {}", error))
        }
    }
}

/// Default content type, then caller headers, then the bearer token
pub fn build_headers(request: &ApiRequest, token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in &request.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::validation(format!("Invalid header name '{}'", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::validation(format!("Invalid value for header '{}'", name)))?;
        headers.insert(name, value);
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::validation("Session token is not a valid header value"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Pull a string `detail` out of an error body
fn error_detail(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}

/// Decode a success body; an empty body reads as `null`
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| Error::InvalidResponse(e.to_string()))
}
