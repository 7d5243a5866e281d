//! Authenticated HTTP transport for the device API.
//!
//! The transport is a thin layer over one shared `reqwest::Client`: it joins
//! paths onto the configured base URL, attaches the derived Basic
//! authorization header on every request, and maps non-success statuses to
//! the device-call-failed error.
//!
//! # Design Principles
//!
//! The transport stays deliberately dumb:
//! - **No automatic retry**: the operator retries by hand
//! - **No backoff, no circuit breaking**: every failure is terminal for its
//!   user action
//! - **No cancellation**: an in-flight request runs to completion even if
//!   the session moves on; late responses for a stale reservation are the
//!   caller's to ignore
//!
//! Reconfiguration (`set_base_url`, `set_credentials`) is purely local and
//! never touches the network.

use scandesk_core::constants::DEFAULT_BASE_URL;
use scandesk_core::constants::DEFAULT_HTTP_TIMEOUT_MS;
use scandesk_core::{Credentials, Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

/// Configuration for the device transport.
///
/// # Example
///
/// ```
/// use scandesk_client::TransportConfig;
/// use scandesk_core::Credentials;
/// use std::time::Duration;
///
/// let config = TransportConfig {
///     base_url: "http://192.168.0.40:7700".to_string(),
///     credentials: Credentials::new("operator", "secret"),
///     timeout: Duration::from_millis(30_000),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL of the device API; paths are joined onto it.
    pub base_url: String,

    /// Credentials the authorization header is derived from.
    pub credentials: Credentials,

    /// Local timeout for a single HTTP request. Must exceed the device-side
    /// long-poll budget on result fetches.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::default(),
            timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        }
    }
}

/// Authenticated HTTP transport against a configured base URL.
pub struct Transport {
    /// Shared connection pool.
    http: reqwest::Client,

    /// Base URL without a trailing slash.
    base_url: String,

    /// Current credentials with the derived authorization value.
    credentials: Credentials,
}

enum Body<'a, B: Serialize> {
    None,
    Json(&'a B),
}

impl Transport {
    /// Create a transport from the given configuration.
    ///
    /// # Errors
    /// Returns `Error::Config` if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: normalize_base_url(&config.base_url),
            credentials: config.credentials,
        })
    }

    /// Point the transport at a different base URL. Local only, chainable.
    pub fn set_base_url(&mut self, url: &str) -> &mut Self {
        self.base_url = normalize_base_url(url);
        self
    }

    /// Replace the credentials and re-derive the authorization value.
    /// Local only, chainable.
    pub fn set_credentials(&mut self, username: &str, password: &str) -> &mut Self {
        self.credentials = Credentials::new(username, password);
        self
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The current credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let response = self
            .request::<()>(reqwest::Method::GET, path_and_query, Body::None)
            .await?;
        self.decode(path_and_query, response).await
    }

    /// GET a resource and discard the body (fire-and-forget triggers).
    pub(crate) async fn get_discard(&self, path_and_query: &str) -> Result<()> {
        self.request::<()>(reqwest::Method::GET, path_and_query, Body::None)
            .await?;
        Ok(())
    }

    /// POST a JSON body and decode a JSON response.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .request(reqwest::Method::POST, path_and_query, Body::Json(body))
            .await?;
        self.decode(path_and_query, response).await
    }

    /// PUT a JSON body and decode a JSON response.
    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .request(reqwest::Method::PUT, path_and_query, Body::Json(body))
            .await?;
        self.decode(path_and_query, response).await
    }

    /// PUT with no body, discarding the response.
    pub(crate) async fn put_discard(&self, path_and_query: &str) -> Result<()> {
        self.request::<()>(reqwest::Method::PUT, path_and_query, Body::None)
            .await?;
        Ok(())
    }

    /// DELETE, discarding the response.
    pub(crate) async fn delete_discard(&self, path_and_query: &str) -> Result<()> {
        self.request::<()>(reqwest::Method::DELETE, path_and_query, Body::None)
            .await?;
        Ok(())
    }

    /// Issue one request and enforce the status policy.
    ///
    /// Any non-success status becomes `Error::DeviceCall` carrying the
    /// endpoint and status code; transport-level failures become
    /// `Error::Transport`. No retries in either case.
    async fn request<B: Serialize>(
        &self,
        method: reqwest::Method,
        path_and_query: &str,
        body: Body<'_, B>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path_and_query);
        trace!(%method, %url, "device request");

        let mut builder = self
            .http
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, self.credentials.authorization());

        if let Body::Json(body) = body {
            // .json() also sets Content-Type: application/json
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| Error::Transport {
            endpoint: path_and_query.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(endpoint = path_and_query, status = status.as_u16(), "device call failed");
            return Err(Error::DeviceCall {
                endpoint: path_and_query.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        response.json().await.map_err(|e| Error::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
