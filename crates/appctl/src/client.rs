//! HTTP transport for the orchestration API.
//!
//! Commands never talk to `reqwest` directly. They build a [`Request`]
//! through the [`Transport`] builder methods and hand it to
//! [`Transport::send`], which lets tests substitute an in-memory fake.
//!
//! # Example
//!
//! ```rust,no_run
//! use appctl::client::{ClientConfig, HttpClient, Transport};
//!
//! # fn example() -> Result<(), appctl::CliError> {
//! let client = HttpClient::new(ClientConfig::new("http://localhost:8080/v2"))?;
//! let response = client.send(client.get("/apps"))?;
//! println!("status: {}", response.status);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use crate::error::CliError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP verb of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case verb name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to be sent: verb, path relative to the API base, and an
/// optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP verb.
    pub method: Method,
    /// Path (and query) appended to the API base URL.
    pub path: String,
    /// Request body, sent verbatim as `application/json`.
    pub body: Option<Vec<u8>>,
}

/// A response: status code plus a readable body.
///
/// The body is released when the response is dropped.
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body stream.
    pub body: Box<dyn Read>,
}

impl Response {
    /// Create a response from a status code and a body reader.
    pub fn new(status: u16, body: impl Read + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Synchronous request/response transport.
///
/// Only [`send`](Transport::send) must be implemented; the builders produce
/// plain [`Request`] values.
pub trait Transport {
    /// Build a `GET` request.
    fn get(&self, path: &str) -> Request {
        Request {
            method: Method::Get,
            path: path.to_owned(),
            body: None,
        }
    }

    /// Build a `POST` request with an optional body.
    fn post(&self, path: &str, body: Option<Vec<u8>>) -> Request {
        Request {
            method: Method::Post,
            path: path.to_owned(),
            body,
        }
    }

    /// Build a `PUT` request.
    fn put(&self, path: &str, body: Vec<u8>) -> Request {
        Request {
            method: Method::Put,
            path: path.to_owned(),
            body: Some(body),
        }
    }

    /// Build a `DELETE` request.
    fn delete(&self, path: &str) -> Request {
        Request {
            method: Method::Delete,
            path: path.to_owned(),
            body: None,
        }
    }

    /// Perform the request and wait for the response headers.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Transport`] if the request cannot be sent.
    fn send(&self, request: Request) -> Result<Response, CliError>;
}

/// Connection settings for [`HttpClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, e.g. `http://localhost:8080/v2`.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Basic auth user name.
    pub user: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Accept invalid TLS certificates.
    pub insecure: bool,
}

impl ClientConfig {
    /// Create a config for `endpoint` with default settings.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            user: None,
            password: None,
            insecure: false,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set basic auth credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, user: impl Into<String>, password: Option<String>) -> Self {
        self.user = Some(user.into());
        self.password = password;
        self
    }

    /// Accept invalid TLS certificates.
    #[must_use]
    pub const fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("insecure", &self.insecure)
            .finish()
    }
}

/// Blocking HTTP client for the orchestration API.
pub struct HttpClient {
    /// Base URL without trailing slash.
    base_url: String,
    /// Basic auth credentials.
    auth: Option<(String, Option<String>)>,
    /// Underlying reqwest client.
    http: Client,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.as_ref().map(|(user, _)| user))
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint does not start with `http://` or `https://`
    /// - The underlying HTTP client cannot be initialized
    pub fn new(config: ClientConfig) -> Result<Self, CliError> {
        if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
            return Err(CliError::Config(format!(
                "invalid endpoint: {}, must start with http:// or https://",
                config.endpoint
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(|e| CliError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_owned(),
            auth: config.user.map(|user| (user, config.password)),
            http,
        })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a request path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Transport for HttpClient {
    fn send(&self, request: Request) -> Result<Response, CliError> {
        let url = self.url(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .http
            .request(method, &url)
            .header(ACCEPT, "application/json");
        if let Some((user, password)) = &self.auth {
            builder = builder.basic_auth(user, password.as_ref());
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        debug!(method = %request.method, url = %url, "Sending request");
        let response = builder.send()?;
        let status = response.status().as_u16();
        debug!(status, "Received response");

        Ok(Response::new(status, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullTransport;

    impl Transport for NullTransport {
        fn send(&self, _request: Request) -> Result<Response, CliError> {
            Ok(Response::new(200, std::io::empty()))
        }
    }

    #[test]
    fn builders_set_method_path_and_body() {
        let t = NullTransport;
        assert_eq!(t.get("/apps").method, Method::Get);
        assert_eq!(t.delete("/apps/a").path, "/apps/a");
        assert_eq!(t.post("/apps/a/restart", None).body, None);
        assert_eq!(t.put("/apps/a", b"{}".to_vec()).body, Some(b"{}".to_vec()));
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(Method::Put.as_str(), "PUT");
    }

    #[test]
    fn invalid_endpoint_rejected() {
        let result = HttpClient::new(ClientConfig::new("ws://localhost:8080"));
        let err = result.expect_err("should fail");
        assert!(err.to_string().contains("invalid endpoint"));
    }

    #[test]
    fn trailing_slash_trimmed() {
        let client = HttpClient::new(ClientConfig::new("http://localhost:8080/v2/"))
            .expect("valid endpoint");
        assert_eq!(client.base_url(), "http://localhost:8080/v2");
        assert_eq!(client.url("/apps"), "http://localhost:8080/v2/apps");
    }

    #[test]
    fn config_debug_hides_password() {
        let config = ClientConfig::new("https://api.example.com")
            .with_basic_auth("admin", Some("hunter2".into()))
            .with_timeout(Duration::from_secs(5));
        let debug = format!("{config:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn unreachable_endpoint_is_transport_error() {
        let config = ClientConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_millis(500));
        let client = HttpClient::new(config).expect("valid endpoint");
        let result = client.send(client.get("/apps"));
        assert!(matches!(result, Err(CliError::Transport(_))));
    }
}
