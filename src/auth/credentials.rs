//! Google credentials file loading
//!
//! Reads the JSON key files produced by the Cloud console (`service_account`)
//! or by `gcloud auth application-default login` (`authorized_user`).

use super::types::AuthConfig;
use crate::error::{Error, Result};
use crate::types::JwtAlgorithm;
use serde::Deserialize;
use std::path::Path;

/// Read-only scope covering both the Admin and Data APIs
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

/// Default OAuth2 token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Parsed credentials file
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialsFile {
    /// Service account key file
    ServiceAccount {
        client_email: String,
        private_key: String,
        #[serde(default)]
        private_key_id: Option<String>,
        #[serde(default)]
        token_uri: Option<String>,
        #[serde(default)]
        project_id: Option<String>,
    },
    /// User credentials with a refresh token
    AuthorizedUser {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
}

impl CredentialsFile {
    /// Parse credentials from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::credentials(e.to_string()))
    }

    /// Load credentials from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Convert into a runtime auth config requesting the given scopes
    pub fn into_auth_config(self, scopes: &[&str]) -> AuthConfig {
        match self {
            CredentialsFile::ServiceAccount {
                client_email,
                private_key,
                private_key_id,
                token_uri,
                ..
            } => AuthConfig::ServiceAccount {
                client_email,
                private_key_id,
                private_key,
                token_uri: token_uri.unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
                scopes: scopes.iter().map(|s| (*s).to_string()).collect(),
                algorithm: JwtAlgorithm::RS256,
                token_lifetime_seconds: 3600,
            },
            CredentialsFile::AuthorizedUser {
                client_id,
                client_secret,
                refresh_token,
            } => AuthConfig::AuthorizedUser {
                token_url: GOOGLE_TOKEN_URL.to_string(),
                client_id,
                client_secret,
                refresh_token,
            },
        }
    }
}
