//! Admin API client

use super::types::{Account, ListAccountsResponse, ListPropertiesResponse, Property};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::token_stream;
use futures::Stream;
use tracing::debug;

/// Production endpoint of the Admin API
pub const DEFAULT_ADMIN_URL: &str = "https://analyticsadmin.googleapis.com";

/// Client for `analyticsadmin.googleapis.com`
#[derive(Debug)]
pub struct AdminClient {
    http: HttpClient,
}

impl AdminClient {
    /// Wrap an HTTP client whose base URL points at the Admin API
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch one page of the accounts visible to the caller
    pub async fn list_accounts(
        &self,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<ListAccountsResponse> {
        debug!(?page_size, has_token = page_token.is_some(), "accounts.list");
        let config = RequestConfig::new()
            .query_opt("pageSize", page_size.map(|s| s.to_string()))
            .query_opt("pageToken", page_token);
        self.http.get_json("/v1beta/accounts", config).await
    }

    /// Fetch one page of properties matching `filter`
    ///
    /// `filter` uses the Admin API syntax, e.g. `parent:accounts/123`.
    pub async fn list_properties(
        &self,
        filter: &str,
        show_deleted: bool,
        page_size: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<ListPropertiesResponse> {
        debug!(filter, show_deleted, ?page_size, "properties.list");
        let config = RequestConfig::new()
            .query("filter", filter)
            .query("showDeleted", show_deleted.to_string())
            .query_opt("pageSize", page_size.map(|s| s.to_string()))
            .query_opt("pageToken", page_token);
        self.http.get_json("/v1beta/properties", config).await
    }

    /// Stream every account, following `nextPageToken`
    pub fn list_all_accounts(&self) -> impl Stream<Item = Result<Account>> + '_ {
        token_stream(move |token: Option<String>| async move {
            self.list_accounts(None, token.as_deref()).await
        })
    }

    /// Stream every property of `accounts/{account_id}`, trashed ones included
    pub fn list_all_properties<'a>(
        &'a self,
        account_id: &str,
    ) -> impl Stream<Item = Result<Property>> + 'a {
        let filter = format!("parent:{}", account_resource(account_id));
        token_stream(move |token: Option<String>| {
            let filter = filter.clone();
            async move {
                self.list_properties(&filter, true, None, token.as_deref())
                    .await
            }
        })
    }
}

/// Normalize an account id into its resource name (`accounts/{id}`)
pub fn account_resource(account_id: &str) -> String {
    let id = account_id.trim();
    if id.starts_with("accounts/") {
        id.to_string()
    } else {
        format!("accounts/{id}")
    }
}
