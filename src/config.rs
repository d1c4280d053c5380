//! Settings for the analytics samples
//!
//! Settings come from an optional YAML file, then environment variables,
//! then command-line flags (applied by the CLI), each layer overriding the
//! previous one.
//!
//! ```yaml
//! credentials: /path/to/service-account.json
//! property_id: "123456789"
//! page_size: 50000
//! http:
//!   timeout_seconds: 30
//!   rate_limit:
//!     requests_per_second: 5
//!     burst_size: 5
//! ```

use crate::admin::{AdminClient, DEFAULT_ADMIN_URL};
use crate::auth::{AuthConfig, CredentialsFile, ANALYTICS_READONLY_SCOPE};
use crate::data::{DataClient, DEFAULT_DATA_URL};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::pagination::TotalRowsPolicy;
use crate::samples::DEFAULT_PAGE_SIZE;
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Path to a Google credentials JSON file
pub const ENV_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Pre-issued OAuth2 access token
pub const ENV_ACCESS_TOKEN: &str = "GA_ACCESS_TOKEN";
pub const ENV_PROPERTY_ID: &str = "GA_PROPERTY_ID";
pub const ENV_ACCOUNT_ID: &str = "GA_ACCOUNT_ID";

// ============================================================================
// Settings
// ============================================================================

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Credentials file (service account or authorized user)
    #[serde(default)]
    pub credentials: Option<PathBuf>,

    /// Static bearer token; takes precedence over `credentials`
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub endpoints: EndpointsConfig,

    #[serde(default)]
    pub http: HttpSettings,

    /// Default property for report commands
    #[serde(default)]
    pub property_id: Option<String>,

    /// Default account for the properties listing
    #[serde(default)]
    pub account_id: Option<String>,

    /// Rows requested per page by the paginated report
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    #[serde(default)]
    pub total_rows: TotalRowsPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credentials: None,
            access_token: None,
            endpoints: EndpointsConfig::default(),
            http: HttpSettings::default(),
            property_id: None,
            account_id: None,
            page_size: default_page_size(),
            total_rows: TotalRowsPolicy::default(),
        }
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// API base URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_admin_url")]
    pub admin_url: String,
    #[serde(default = "default_data_url")]
    pub data_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            admin_url: default_admin_url(),
            data_url: default_data_url(),
        }
    }
}

fn default_admin_url() -> String {
    DEFAULT_ADMIN_URL.to_string()
}

fn default_data_url() -> String {
    DEFAULT_DATA_URL.to_string()
}

/// Transport settings shared by both API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Client-side rate limit; omitted means the client default
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    #[serde(default = "default_initial_backoff")]
    pub initial_ms: u64,

    #[serde(default = "default_max_backoff")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::default(),
            initial_ms: default_initial_backoff(),
            max_ms: default_max_backoff(),
        }
    }
}

fn default_initial_backoff() -> u64 {
    250
}

fn default_max_backoff() -> u64 {
    30_000
}

// ============================================================================
// Loading
// ============================================================================

impl Settings {
    /// Parse settings from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    /// Settings from `path` (or defaults) with the process environment applied
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Override fields from environment variables looked up through `lookup`
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_CREDENTIALS).none_if_empty() {
            debug!(path = %path, "Using credentials from {}", ENV_CREDENTIALS);
            self.credentials = Some(PathBuf::from(path));
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).none_if_empty() {
            self.access_token = Some(token);
        }
        if let Some(id) = lookup(ENV_PROPERTY_ID).none_if_empty() {
            self.property_id = Some(id);
        }
        if let Some(id) = lookup(ENV_ACCOUNT_ID).none_if_empty() {
            self.account_id = Some(id);
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.endpoints.admin_url)?;
        url::Url::parse(&self.endpoints.data_url)?;
        if self.page_size <= 0 {
            return Err(Error::config(format!(
                "page_size must be positive, got {}",
                self.page_size
            )));
        }
        if let Some(rate_limit) = &self.http.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::config("rate_limit.requests_per_second must be positive"));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn property_id(&self) -> Result<&str> {
        self.property_id
            .as_deref()
            .ok_or_else(|| Error::missing_setting("property_id"))
    }

    pub fn account_id(&self) -> Result<&str> {
        self.account_id
            .as_deref()
            .ok_or_else(|| Error::missing_setting("account_id"))
    }

    // ========================================================================
    // Client construction
    // ========================================================================

    /// Resolve how requests are authorized
    pub fn auth_config(&self) -> Result<AuthConfig> {
        if let Some(token) = &self.access_token {
            return Ok(AuthConfig::Bearer {
                token: token.clone(),
            });
        }
        match &self.credentials {
            Some(path) => {
                let credentials = CredentialsFile::from_file(path)?;
                Ok(credentials.into_auth_config(&[ANALYTICS_READONLY_SCOPE]))
            }
            None => Err(Error::missing_setting(format!(
                "credentials (set {ENV_CREDENTIALS}, {ENV_ACCESS_TOKEN} or --credentials)"
            ))),
        }
    }

    /// Transport configuration for `base_url`
    pub fn http_config(&self, base_url: &str) -> HttpClientConfig {
        let backoff = &self.http.retry_backoff;
        let mut builder = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                backoff.backoff_type,
                Duration::from_millis(backoff.initial_ms),
                Duration::from_millis(backoff.max_ms),
            );
        if let Some(rate_limit) = &self.http.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        builder.build()
    }

    pub fn admin_client(&self) -> Result<AdminClient> {
        let http = HttpClient::with_auth(
            self.http_config(&self.endpoints.admin_url),
            self.auth_config()?,
        )?;
        Ok(AdminClient::new(http))
    }

    pub fn data_client(&self) -> Result<DataClient> {
        let http = HttpClient::with_auth(
            self.http_config(&self.endpoints.data_url),
            self.auth_config()?,
        )?;
        Ok(DataClient::new(http))
    }
}
