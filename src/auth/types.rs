//! Auth configuration types
//!
//! These types represent the runtime auth configuration after the
//! credentials file and settings have been resolved.

use crate::types::JwtAlgorithm;
use chrono::{DateTime, Utc};

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthConfig {
    /// No authentication (mock servers, emulators)
    #[default]
    None,

    /// Pre-issued OAuth2 access token
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Service account key: a signed JWT exchanged for an access token
    ServiceAccount {
        /// Service account email (iss claim)
        client_email: String,
        /// Key id placed in the JWT header
        private_key_id: Option<String>,
        /// Private key for signing (PEM format)
        private_key: String,
        /// Token endpoint (aud claim and exchange URL)
        token_uri: String,
        /// Requested scopes
        scopes: Vec<String>,
        /// Signing algorithm
        algorithm: JwtAlgorithm,
        /// Assertion lifetime in seconds
        token_lifetime_seconds: u64,
    },

    /// Authorized user credentials (OAuth2 refresh token flow)
    AuthorizedUser {
        /// Token endpoint URL
        token_url: String,
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
        /// Refresh token
        refresh_token: String,
    },
}

impl AuthConfig {
    /// Whether this config needs a token exchange before the first request
    pub fn requires_token_exchange(&self) -> bool {
        matches!(
            self,
            AuthConfig::ServiceAccount { .. } | AuthConfig::AuthorizedUser { .. }
        )
    }

    /// Short label for logging, never includes secrets
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::ServiceAccount { .. } => "service_account",
            AuthConfig::AuthorizedUser { .. } => "authorized_user",
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}
