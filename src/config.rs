//! Configuration management for the Zendesk client.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure the values are usable before any request is
//! made.

use std::env;
use std::time::Duration;

use crate::client::{validate_subdomain, DEFAULT_TIMEOUT_SECS};
use crate::credential::Credential;
use crate::error::ZendeskError;

/// Where API requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A validated tenant subdomain.
    Subdomain(String),
    /// A full base URL, e.g. a mock server.
    Url(String),
}

/// Configuration for connecting to Zendesk.
///
/// The credential secret is stored but never logged or exposed in error
/// messages.
#[derive(Debug, Clone)]
pub struct Config {
    /// Target of all requests.
    pub endpoint: Endpoint,

    /// Credential, or `None` for unauthenticated requests.
    pub credential: Option<Credential>,

    /// Transport timeout.
    pub timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ZENDESK_SUBDOMAIN` or `ZENDESK_ENDPOINT_URL` (one required; the
    ///   URL wins when both are set)
    /// - `ZENDESK_OAUTH_TOKEN`: bearer token
    /// - `ZENDESK_EMAIL` with `ZENDESK_API_TOKEN` or `ZENDESK_PASSWORD`
    /// - `ZENDESK_TIMEOUT_SECS`: transport timeout (default 30)
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Config` if a required variable is missing or
    /// a value fails validation, and `ZendeskError::InvalidSubdomain` for a
    /// malformed subdomain.
    pub fn from_env() -> Result<Self, ZendeskError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    fn from_lookup<F>(lookup: F) -> Result<Self, ZendeskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let endpoint = match (get("ZENDESK_ENDPOINT_URL"), get("ZENDESK_SUBDOMAIN")) {
            (Some(url), _) => Endpoint::Url(Self::validate_endpoint_url(url)?),
            (None, Some(subdomain)) => {
                validate_subdomain(&subdomain)?;
                Endpoint::Subdomain(subdomain)
            }
            (None, None) => return Err(ZendeskError::missing_env("ZENDESK_SUBDOMAIN")),
        };

        let credential = match (
            get("ZENDESK_OAUTH_TOKEN"),
            get("ZENDESK_EMAIL"),
            get("ZENDESK_API_TOKEN"),
            get("ZENDESK_PASSWORD"),
        ) {
            (Some(token), _, _, _) => {
                Self::validate_secret("ZENDESK_OAUTH_TOKEN", &token)?;
                Some(Credential::bearer(token))
            }
            (None, Some(email), Some(token), _) => {
                Self::validate_secret("ZENDESK_API_TOKEN", &token)?;
                Some(Credential::api_token(email, token))
            }
            (None, Some(email), None, Some(password)) => {
                Self::validate_secret("ZENDESK_PASSWORD", &password)?;
                Some(Credential::basic(email, password))
            }
            (None, Some(_), None, None) => {
                return Err(ZendeskError::invalid_config(
                    "ZENDESK_EMAIL requires ZENDESK_API_TOKEN or ZENDESK_PASSWORD",
                ))
            }
            (None, None, _, _) => None,
        };

        let timeout = match get("ZENDESK_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    ZendeskError::invalid_config("ZENDESK_TIMEOUT_SECS must be a whole number")
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Config {
            endpoint,
            credential,
            timeout,
        })
    }

    /// Validates and normalizes an endpoint URL.
    fn validate_endpoint_url(url: String) -> Result<String, ZendeskError> {
        // Remove trailing slash for consistency
        let url = url.trim_end_matches('/').to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ZendeskError::invalid_config(
                "ZENDESK_ENDPOINT_URL must start with http:// or https://",
            ));
        }

        Ok(url)
    }

    /// Rejects secrets that are obviously placeholders.
    fn validate_secret(name: &str, secret: &str) -> Result<(), ZendeskError> {
        let lower = secret.to_lowercase();
        let placeholder_patterns = ["your_api_token", "your_token", "placeholder", "changeme"];

        if placeholder_patterns.iter().any(|p| lower.contains(p)) {
            return Err(ZendeskError::invalid_config(format!(
                "{} appears to be a placeholder value",
                name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ZendeskError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_requires_endpoint() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("ZENDESK_SUBDOMAIN"));
    }

    #[test]
    fn test_subdomain_is_validated() {
        assert!(matches!(
            load(&[("ZENDESK_SUBDOMAIN", "Bad_One")]),
            Err(ZendeskError::InvalidSubdomain(_))
        ));

        let config = load(&[("ZENDESK_SUBDOMAIN", "acme")]).unwrap();
        assert_eq!(config.endpoint, Endpoint::Subdomain("acme".to_string()));
        assert!(config.credential.is_none());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_endpoint_url_wins() {
        let config = load(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_ENDPOINT_URL", "http://localhost:8080/"),
        ])
        .unwrap();
        assert_eq!(
            config.endpoint,
            Endpoint::Url("http://localhost:8080".to_string())
        );
    }

    #[test]
    fn test_endpoint_url_requires_scheme() {
        assert!(load(&[("ZENDESK_ENDPOINT_URL", "localhost:8080")]).is_err());
    }

    #[test]
    fn test_bearer_takes_precedence() {
        let config = load(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_OAUTH_TOKEN", "oauth123"),
            ("ZENDESK_EMAIL", "a@acme.com"),
            ("ZENDESK_API_TOKEN", "tok"),
        ])
        .unwrap();
        assert_eq!(config.credential, Some(Credential::bearer("oauth123")));
    }

    #[test]
    fn test_api_token_credential() {
        let config = load(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_EMAIL", "a@acme.com"),
            ("ZENDESK_API_TOKEN", "tok"),
            ("ZENDESK_PASSWORD", "pw"),
        ])
        .unwrap();
        assert_eq!(
            config.credential,
            Some(Credential::api_token("a@acme.com", "tok"))
        );
    }

    #[test]
    fn test_password_credential() {
        let config = load(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_EMAIL", "a@acme.com"),
            ("ZENDESK_PASSWORD", "pw"),
        ])
        .unwrap();
        assert_eq!(
            config.credential,
            Some(Credential::basic("a@acme.com", "pw"))
        );
    }

    #[test]
    fn test_email_without_secret_is_rejected() {
        let result = load(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_EMAIL", "a@acme.com"),
        ]);
        assert!(matches!(result, Err(ZendeskError::Config(_))));
    }

    #[test]
    fn test_rejects_placeholder_secret() {
        let result = load(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_OAUTH_TOKEN", "your_token_here"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_timeout_parsing() {
        let config = load(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));

        assert!(load(&[
            ("ZENDESK_SUBDOMAIN", "acme"),
            ("ZENDESK_TIMEOUT_SECS", "soon"),
        ])
        .is_err());
    }
}
