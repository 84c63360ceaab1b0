//! Authentication material attached to every request.

use std::fmt;

use reqwest::RequestBuilder;

/// Identity used to authenticate against the Zendesk API.
///
/// A client holds at most one credential; without one, requests go out
/// unauthenticated. Credentials are immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// HTTP Basic authentication with an email as the username.
    Basic {
        /// Username sent with the request.
        email: String,
        /// Password or API token.
        secret: String,
    },

    /// OAuth access token sent as `Authorization: Bearer <token>`.
    Bearer {
        /// The access token.
        token: String,
    },
}

impl Credential {
    /// Email and password.
    pub fn basic(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            email: email.into(),
            secret: password.into(),
        }
    }

    /// Email and API token.
    ///
    /// Zendesk expects API tokens as Basic auth with `{email}/token` as the
    /// username.
    pub fn api_token(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self::Basic {
            email: format!("{}/token", email.into()),
            secret: token.into(),
        }
    }

    /// OAuth access token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// The Basic auth username. Empty for bearer tokens.
    pub fn email(&self) -> &str {
        match self {
            Self::Basic { email, .. } => email,
            Self::Bearer { .. } => "",
        }
    }

    /// The password, API token, or access token.
    pub fn secret(&self) -> &str {
        match self {
            Self::Basic { secret, .. } => secret,
            Self::Bearer { token } => token,
        }
    }

    /// Returns true for bearer tokens.
    pub fn is_bearer(&self) -> bool {
        matches!(self, Self::Bearer { .. })
    }

    /// Attaches this credential to an outgoing request.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { email, secret } => request.basic_auth(email, Some(secret)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }
}

// Secrets stay out of debug output and therefore out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { email, .. } => f
                .debug_struct("Basic")
                .field("email", email)
                .field("secret", &"[REDACTED]")
                .finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"[REDACTED]")
                .finish(),
        }
    }
}
