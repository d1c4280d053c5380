//! Authentication module
//!
//! Supports: Google service account keys, authorized user (refresh token)
//! credentials, and static bearer tokens.
//!
//! The `Authenticator` applies credentials to outgoing requests and caches
//! access tokens for the credential types that require token exchange.

mod authenticator;
mod credentials;
mod types;

pub use authenticator::Authenticator;
pub use credentials::{CredentialsFile, ANALYTICS_READONLY_SCOPE, GOOGLE_TOKEN_URL};
pub use types::{AuthConfig, CachedToken};

#[cfg(test)]
mod tests;
