//! Google Analytics Admin API
//!
//! Read-only account and property listings (`v1beta`). Both listings are
//! paginated with `pageToken`; the `list_all_*` methods stream every item
//! across pages.

mod client;
mod types;

pub use client::{account_resource, AdminClient, DEFAULT_ADMIN_URL};
pub use types::{Account, ListAccountsResponse, ListPropertiesResponse, Property};

#[cfg(test)]
mod tests;
