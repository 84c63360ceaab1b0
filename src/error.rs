//! Error types for the Zendesk client.
//!
//! Two disjoint families of failure reach the caller:
//!
//! - [`ZendeskError`] variants other than `Api` cover everything that goes
//!   wrong before a status code exists: configuration, request construction,
//!   JSON encoding, the network itself, or decoding a successful body.
//! - [`ApiError`] (wrapped in `ZendeskError::Api`) is a completed HTTP
//!   exchange whose status code was not in the accepted set for the verb.
//!   It keeps the raw body so callers can parse Zendesk's own error schema.
//!
//! # Security
//!
//! Credential secrets are never part of an error message. `ApiError`
//! carries only what the server sent back.

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all client operations.
#[derive(Error, Debug)]
pub enum ZendeskError {
    /// Configuration error - missing or invalid environment variables or
    /// builder settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input validation failed before any request was attempted.
    #[error("validation error: {0}")]
    Validation(String),

    /// The subdomain does not match `[a-z0-9][a-z0-9-]+[a-z0-9]`.
    #[error("{0} is invalid subdomain")]
    InvalidSubdomain(String),

    /// An endpoint URL could not be parsed.
    #[error("invalid endpoint URL {url:?}: {source}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },

    /// HTTP request failed during transmission or while reading the body.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The transport gave up waiting for the server.
    #[error("request timed out ({operation})")]
    Timeout {
        /// The timeout the client was built with. `None` when a custom
        /// `reqwest::Client` was supplied, since its timeout is unknown.
        duration: Option<Duration>,
        /// Method and path of the request that timed out.
        operation: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A response body did not contain the expected envelope key.
    #[error("response has no {key:?} envelope")]
    MissingEnvelope {
        /// The key that was expected at the top level of the body.
        key: String,
    },

    /// The API answered with a status outside the accepted set.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ZendeskError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        ZendeskError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ZendeskError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ZendeskError::Validation(message.into())
    }

    /// Creates a missing-envelope error.
    pub fn missing_envelope(key: impl Into<String>) -> Self {
        ZendeskError::MissingEnvelope { key: key.into() }
    }

    /// Returns true if the server rejected the request (as opposed to a
    /// transport, encoding, or configuration failure).
    #[must_use]
    pub fn is_api(&self) -> bool {
        matches!(self, ZendeskError::Api(_))
    }

    /// Returns the structured API error, if this is one.
    #[must_use]
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ZendeskError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the HTTP status of an API rejection.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.as_api().map(ApiError::status)
    }
}

/// A completed HTTP exchange whose status code was not accepted.
///
/// Holds the exact response body bytes together with the status and
/// headers, so callers can decide for themselves how to interpret
/// Zendesk's error payloads (`{"error": ..., "description": ...}` and
/// friends). The client never parses them.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiError {
    /// Creates an API error from a response's parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// The HTTP status code returned by the server.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw response body, byte for byte.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body decoded as UTF-8, lossily.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Consumes the error and returns the body.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Returns true for statuses that usually clear up on their own
    /// (429 and 5xx).
    ///
    /// This is only a hint for the caller: the client itself never retries.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS || self.status.is_server_error()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.body_text();
        let message = if text.is_empty() {
            self.status.canonical_reason().unwrap_or("")
        } else {
            text.as_str()
        };
        write!(f, "{}: {}", self.status.as_u16(), message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, body: &str) -> ApiError {
        ApiError::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_missing_env_error() {
        let err = ZendeskError::missing_env("ZENDESK_SUBDOMAIN");
        assert!(err.to_string().contains("ZENDESK_SUBDOMAIN"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_invalid_subdomain_message() {
        let err = ZendeskError::InvalidSubdomain("Bad_Sub".to_string());
        assert_eq!(err.to_string(), "Bad_Sub is invalid subdomain");
    }

    #[test]
    fn test_api_error_display_uses_body() {
        let err = api_error(422, r#"{"error":"RecordInvalid"}"#);
        assert_eq!(err.to_string(), r#"422: {"error":"RecordInvalid"}"#);
    }

    #[test]
    fn test_api_error_display_falls_back_to_reason() {
        let err = api_error(404, "");
        assert_eq!(err.to_string(), "404: Not Found");
    }

    #[test]
    fn test_api_error_keeps_exact_body() {
        let body = b"\x00raw\xffbytes".to_vec();
        let err = ApiError::new(StatusCode::BAD_REQUEST, HeaderMap::new(), body.clone());
        assert_eq!(err.body(), body.as_slice());
        assert_eq!(err.into_body(), body);
    }

    #[test]
    fn test_is_transient() {
        assert!(api_error(429, "").is_transient());
        assert!(api_error(503, "").is_transient());
        assert!(!api_error(404, "").is_transient());
        assert!(!api_error(422, "").is_transient());
    }

    #[test]
    fn test_zendesk_error_api_accessors() {
        let err: ZendeskError = api_error(401, "Couldn't authenticate you").into();
        assert!(err.is_api());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.to_string(), "401: Couldn't authenticate you");

        let err = ZendeskError::validation("bad header");
        assert!(!err.is_api());
        assert!(err.status().is_none());
    }
}
