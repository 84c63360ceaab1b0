//! HTTP client for the Zendesk REST API.
//!
//! This module provides [`Client`], the shared request pipeline behind
//! every resource method, and [`ClientBuilder`] to configure it.
//!
//! # Pipeline
//!
//! Every call goes through the same steps:
//!
//! 1. The target is the configured base URL followed by the path, which
//!    must already carry its encoded query string.
//! 2. All configured headers are attached, then the credential.
//! 3. The request is sent and the whole body is read before the status
//!    is looked at.
//! 4. The status is checked against the verb's accepted set. Anything else
//!    becomes a [`ZendeskError::Api`] holding the exact body.
//!
//! | Verb   | Accepted statuses |
//! |--------|-------------------|
//! | GET    | 200               |
//! | POST   | 200, 201          |
//! | PUT    | 200, 204          |
//! | PATCH  | 200, 204          |
//! | DELETE | 204               |
//!
//! Network and encoding failures are returned as they happen. Nothing is
//! retried, cached, or rate limited here.
//!
//! # Security
//!
//! The credential secret is never logged.

use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{Config, Endpoint};
use crate::credential::Credential;
use crate::error::{ApiError, ZendeskError};

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Host that tenant subdomains are prefixed to.
const API_HOST: &str = "zendesk.com";

/// Identifies this library to the API.
const DEFAULT_USER_AGENT: &str = concat!("zendesk-rust/", env!("CARGO_PKG_VERSION"));

const GET_ACCEPTED: &[StatusCode] = &[StatusCode::OK];
const POST_ACCEPTED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
// Some mutation endpoints answer 204 No Content.
const PUT_ACCEPTED: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];
const DELETE_ACCEPTED: &[StatusCode] = &[StatusCode::NO_CONTENT];

/// Zendesk API client.
///
/// Holds the base URL, an optional credential and the headers sent with
/// every request. Configure it with [`ClientBuilder`] (or the setters)
/// before issuing requests; setters need `&mut self`, so they cannot run
/// while a request borrows the client.
///
/// # Example
///
/// ```ignore
/// let client = Client::builder()
///     .subdomain("acme")
///     .credential(Credential::api_token("agent@acme.com", token))
///     .build()?;
///
/// let group = client.get_group(42).await?;
/// ```
#[derive(Clone)]
pub struct Client {
    /// The underlying HTTP client (cloning is cheap).
    http: reqwest::Client,

    /// Base URL without a trailing slash, e.g. `https://acme.zendesk.com/api/v2`.
    base_url: String,

    /// SECURITY: Never log this value!
    credential: Option<Credential>,

    /// Headers sent with every request.
    headers: HeaderMap,

    /// Transport timeout, reported back in `ZendeskError::Timeout`. Unknown
    /// for a caller-supplied `reqwest::Client`.
    timeout: Option<Duration>,
}

impl Client {
    /// Returns a builder with default headers and timeout.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client from environment-derived configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or the HTTP client fails
    /// to initialize.
    pub fn from_config(config: &Config) -> Result<Self, ZendeskError> {
        let builder = match &config.endpoint {
            Endpoint::Subdomain(subdomain) => ClientBuilder::new().subdomain(subdomain.clone()),
            Endpoint::Url(url) => ClientBuilder::new().endpoint_url(url.clone()),
        };
        let builder = builder.timeout(config.timeout);
        match &config.credential {
            Some(credential) => builder.credential(credential.clone()).build(),
            None => builder.build(),
        }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The configured credential, if any.
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Points the client at `https://{subdomain}.zendesk.com/api/v2`.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::InvalidSubdomain` unless the subdomain matches
    /// `[a-z0-9][a-z0-9-]+[a-z0-9]`.
    pub fn set_subdomain(&mut self, subdomain: &str) -> Result<(), ZendeskError> {
        self.base_url = subdomain_base_url(subdomain)?;
        Ok(())
    }

    /// Replaces the full endpoint URL, skipping subdomain validation.
    ///
    /// Mainly used to point the client at a mock server.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::InvalidUrl` if the URL does not parse.
    pub fn set_endpoint_url(&mut self, url: &str) -> Result<(), ZendeskError> {
        self.base_url = normalize_endpoint_url(url)?;
        Ok(())
    }

    /// Sets or clears the credential.
    pub fn set_credential(&mut self, credential: Option<Credential>) {
        self.credential = credential;
    }

    /// Sets a header sent with every request, replacing any header of the
    /// same name (including the defaults).
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Validation` for an invalid name or value.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), ZendeskError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ZendeskError::validation(format!("invalid header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            ZendeskError::validation(format!("invalid value for header {}: {}", name, e))
        })?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Sends a GET request and returns the raw body. Accepts 200 only.
    ///
    /// This is the escape hatch for endpoints without a typed method; the
    /// path must already include any query string.
    pub async fn get(&self, path: &str) -> Result<Vec<u8>, ZendeskError> {
        self.execute(Method::GET, path, None, GET_ACCEPTED).await
    }

    /// JSON-encodes `data`, POSTs it and returns the raw body. Accepts 200
    /// and 201.
    pub async fn post<T>(&self, path: &str, data: &T) -> Result<Vec<u8>, ZendeskError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(data)?;
        self.execute(Method::POST, path, Some(body), POST_ACCEPTED)
            .await
    }

    /// JSON-encodes `data`, PUTs it and returns the raw body. Accepts 200
    /// and 204; a 204 yields an empty body.
    pub async fn put<T>(&self, path: &str, data: &T) -> Result<Vec<u8>, ZendeskError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(data)?;
        self.execute(Method::PUT, path, Some(body), PUT_ACCEPTED).await
    }

    /// JSON-encodes `data`, PATCHes it and returns the raw body. Accepts
    /// 200 and 204.
    pub async fn patch<T>(&self, path: &str, data: &T) -> Result<Vec<u8>, ZendeskError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(data)?;
        self.execute(Method::PATCH, path, Some(body), PUT_ACCEPTED)
            .await
    }

    /// Sends a DELETE request. Accepts 204 only.
    ///
    /// With `None` no body is sent at all; pass `None::<&()>` when there is
    /// nothing to send.
    pub async fn delete<T>(&self, path: &str, data: Option<&T>) -> Result<(), ZendeskError>
    where
        T: Serialize + ?Sized,
    {
        let body = data.map(serde_json::to_vec).transpose()?;
        self.execute(Method::DELETE, path, body, DELETE_ACCEPTED)
            .await?;
        Ok(())
    }

    /// GETs `path` and decodes the whole body as JSON.
    pub async fn get_data<T>(&self, path: &str) -> Result<T, ZendeskError>
    where
        T: DeserializeOwned,
    {
        let body = self.get(path).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Runs one request through the pipeline.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        accepted: &[StatusCode],
    ) -> Result<Vec<u8>, ZendeskError> {
        let url = format!("{}{}", self.base_url, path);
        let operation = format!("{} {}", method, path);

        tracing::debug!(method = %method, path = %path, "Making Zendesk API request");

        let mut headers = self.headers.clone();
        if self.credential.is_some() {
            // reqwest appends auth headers, so a configured one must go first.
            headers.remove(AUTHORIZATION);
        }

        let mut req = self.http.request(method, &url).headers(headers);
        if let Some(credential) = &self.credential {
            req = credential.apply(req);
        }
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| self.transport_error(e, &operation))?;

        let status = response.status();
        let headers = response.headers().clone();

        // The body is needed for error reporting whatever the status is.
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e, &operation))?
            .to_vec();

        tracing::trace!(body = %String::from_utf8_lossy(&body), "Zendesk API response");

        if !accepted.contains(&status) {
            tracing::warn!(
                operation = %operation,
                status = %status,
                "Zendesk API rejected request"
            );
            return Err(ApiError::new(status, headers, body).into());
        }

        tracing::debug!(operation = %operation, status = %status, "Zendesk API request succeeded");

        Ok(body)
    }

    fn transport_error(&self, e: reqwest::Error, operation: &str) -> ZendeskError {
        if e.is_timeout() {
            return ZendeskError::Timeout {
                duration: self.timeout,
                operation: operation.to_string(),
            };
        }
        ZendeskError::Http(e)
    }
}

/// Builder for [`Client`].
///
/// Either a subdomain or an endpoint URL is required; when both are given
/// the endpoint URL wins.
pub struct ClientBuilder {
    subdomain: Option<String>,
    endpoint_url: Option<String>,
    credential: Option<Credential>,
    headers: Vec<(String, String)>,
    timeout: Duration,
    http: Option<reqwest::Client>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Creates a builder with the default timeout.
    pub fn new() -> Self {
        Self {
            subdomain: None,
            endpoint_url: None,
            credential: None,
            headers: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            http: None,
        }
    }

    /// Sets the tenant subdomain.
    pub fn subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = Some(subdomain.into());
        self
    }

    /// Sets a full endpoint URL, e.g. a mock server.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Sets the credential.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Adds a header sent with every request. Later values for the same
    /// name replace earlier ones and the defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the transport timeout. Ignored when a custom HTTP client is
    /// supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Uses a preconfigured `reqwest::Client`.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Validates the settings and builds the client.
    ///
    /// # Errors
    ///
    /// - `ZendeskError::Config` if no endpoint was configured
    /// - `ZendeskError::InvalidSubdomain` / `InvalidUrl` for a bad endpoint
    /// - `ZendeskError::Validation` for an invalid header
    /// - `ZendeskError::HttpClient` if the HTTP client fails to initialize
    pub fn build(self) -> Result<Client, ZendeskError> {
        let base_url = match (&self.endpoint_url, &self.subdomain) {
            (Some(url), _) => normalize_endpoint_url(url)?,
            (None, Some(subdomain)) => subdomain_base_url(subdomain)?,
            (None, None) => {
                return Err(ZendeskError::invalid_config(
                    "either a subdomain or an endpoint URL is required",
                ))
            }
        };

        let (http, timeout) = match self.http {
            Some(http) => (http, None),
            None => {
                let http = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(ZendeskError::HttpClient)?;
                (http, Some(self.timeout))
            }
        };

        let mut client = Client {
            http,
            base_url,
            credential: self.credential,
            headers: default_headers(),
            timeout,
        };

        for (name, value) in &self.headers {
            client.set_header(name, value)?;
        }

        Ok(client)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Validates a tenant subdomain against `^[a-z0-9][a-z0-9-]+[a-z0-9]$`.
///
/// # Errors
///
/// Returns `ZendeskError::InvalidSubdomain` on any mismatch.
pub fn validate_subdomain(subdomain: &str) -> Result<(), ZendeskError> {
    let bytes = subdomain.as_bytes();
    let edge = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    let inner = |b: &u8| edge(b) || *b == b'-';

    let valid = match bytes {
        [first, middle @ .., last] if !middle.is_empty() => {
            edge(first) && edge(last) && middle.iter().all(inner)
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ZendeskError::InvalidSubdomain(subdomain.to_string()))
    }
}

fn subdomain_base_url(subdomain: &str) -> Result<String, ZendeskError> {
    validate_subdomain(subdomain)?;
    Ok(format!("https://{}.{}/api/v2", subdomain, API_HOST))
}

/// Parses an endpoint URL and strips the trailing slash so paths can be
/// appended verbatim.
fn normalize_endpoint_url(url: &str) -> Result<String, ZendeskError> {
    let trimmed = url.trim();
    Url::parse(trimmed).map_err(|source| ZendeskError::InvalidUrl {
        url: trimmed.to_string(),
        source,
    })?;
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_subdomain_accepts_valid() {
        for subdomain in ["acme", "a1b", "my-company", "123", "a-b-c"] {
            assert!(
                validate_subdomain(subdomain).is_ok(),
                "{} should be valid",
                subdomain
            );
        }
    }

    #[test]
    fn test_validate_subdomain_rejects_invalid() {
        for subdomain in [
            "", "a", "ab", "Acme", "ac_me", "-acme", "acme-", "ac.me", "ac me", "äcme",
        ] {
            assert!(
                matches!(
                    validate_subdomain(subdomain),
                    Err(ZendeskError::InvalidSubdomain(_))
                ),
                "{:?} should be invalid",
                subdomain
            );
        }
    }

    #[test]
    fn test_build_from_subdomain() {
        let client = Client::builder().subdomain("acme").build().unwrap();
        assert_eq!(client.base_url(), "https://acme.zendesk.com/api/v2");
    }

    #[test]
    fn test_build_rejects_invalid_subdomain() {
        let result = Client::builder().subdomain("Not_Valid").build();
        assert!(matches!(result, Err(ZendeskError::InvalidSubdomain(_))));
    }

    #[test]
    fn test_build_requires_endpoint() {
        let result = Client::builder().build();
        assert!(matches!(result, Err(ZendeskError::Config(_))));
    }

    #[test]
    fn test_endpoint_url_wins_and_is_normalized() {
        let client = Client::builder()
            .subdomain("acme")
            .endpoint_url("http://127.0.0.1:8080/api/v2/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080/api/v2");
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        let result = Client::builder().endpoint_url("not a url").build();
        assert!(matches!(result, Err(ZendeskError::InvalidUrl { .. })));
    }

    #[test]
    fn test_default_headers() {
        let client = Client::builder().subdomain("acme").build().unwrap();
        let headers = client.headers();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers
            .get(USER_AGENT)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("zendesk-rust/"));
    }

    #[test]
    fn test_custom_header_overrides_default() {
        let client = Client::builder()
            .subdomain("acme")
            .header("User-Agent", "my-app/1.0")
            .header("X-Trace", "one")
            .header("X-Trace", "two")
            .build()
            .unwrap();
        let headers = client.headers();
        assert_eq!(headers.get(USER_AGENT).unwrap(), "my-app/1.0");
        assert_eq!(headers.get_all("x-trace").iter().count(), 1);
        assert_eq!(headers.get("x-trace").unwrap(), "two");
    }

    #[test]
    fn test_set_header_rejects_invalid() {
        let mut client = Client::builder().subdomain("acme").build().unwrap();
        assert!(client.set_header("bad header", "x").is_err());
        assert!(client.set_header("X-Ok", "line\nbreak").is_err());
    }

    #[test]
    fn test_setters() {
        let mut client = Client::builder().subdomain("acme").build().unwrap();
        client.set_subdomain("other-co").unwrap();
        assert_eq!(client.base_url(), "https://other-co.zendesk.com/api/v2");

        assert!(client.set_subdomain("-bad").is_err());
        assert_eq!(client.base_url(), "https://other-co.zendesk.com/api/v2");

        client.set_endpoint_url("http://localhost:9999").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999");

        assert!(client.credential().is_none());
        client.set_credential(Some(Credential::bearer("t")));
        assert!(client.credential().unwrap().is_bearer());
    }

    #[test]
    fn test_timeout_known_only_for_built_in_http_client() {
        let client = Client::builder()
            .subdomain("acme")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.timeout, Some(Duration::from_secs(5)));

        let client = Client::builder()
            .subdomain("acme")
            .timeout(Duration::from_secs(5))
            .http_client(reqwest::Client::new())
            .build()
            .unwrap();
        assert_eq!(client.timeout, None);
    }
}
