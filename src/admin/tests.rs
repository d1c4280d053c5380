//! Tests for the Admin API module

use super::*;
use crate::error::ServiceCode;
use crate::http::{HttpClient, HttpClientConfig};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn admin_client(uri: String) -> AdminClient {
    let config = HttpClientConfig::builder()
        .base_url(uri)
        .max_retries(0)
        .no_rate_limit()
        .build();
    AdminClient::new(HttpClient::with_config(config).unwrap())
}

#[test]
fn test_account_resource() {
    assert_eq!(account_resource("123"), "accounts/123");
    assert_eq!(account_resource("accounts/123"), "accounts/123");
}

#[test]
fn test_parse_account() {
    let account: Account = serde_json::from_value(json!({
        "name": "accounts/100",
        "displayName": "Demo Account",
        "regionCode": "US",
        "createTime": "2020-10-15T11:22:33.456Z",
        "updateTime": "2021-01-02T03:04:05Z"
    }))
    .unwrap();

    assert_eq!(account.display_name, "Demo Account");
    assert_eq!(account.region_code, "US");
    assert_eq!(account.create_time.unwrap().timestamp(), 1_602_760_953);
    assert!(!account.deleted);
}

#[test]
fn test_parse_deleted_property() {
    let property: Property = serde_json::from_value(json!({
        "name": "properties/200",
        "parent": "accounts/100",
        "displayName": "Old site",
        "currencyCode": "EUR",
        "timeZone": "Europe/Berlin",
        "propertyType": "PROPERTY_TYPE_ORDINARY",
        "deleteTime": "2024-02-01T00:00:00Z",
        "expireTime": "2024-03-07T00:00:00Z",
        "account": "accounts/100"
    }))
    .unwrap();

    assert_eq!(property.parent, "accounts/100");
    assert!(property.delete_time.is_some());
    assert!(property.create_time.is_none());
    assert_eq!(property.account.as_deref(), Some("accounts/100"));
}

#[tokio::test]
async fn test_list_accounts_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accounts"))
        .and(query_param("pageSize", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "accounts/1", "displayName": "One"}],
            "nextPageToken": "next"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = admin_client(mock_server.uri());
    let page = client.list_accounts(Some(1), None).await.unwrap();

    assert_eq!(page.accounts.len(), 1);
    assert_eq!(page.next_page_token.as_deref(), Some("next"));
}

#[tokio::test]
async fn test_list_all_accounts_follows_tokens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accounts"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "accounts/3"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"name": "accounts/1"}, {"name": "accounts/2"}],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = admin_client(mock_server.uri());
    let accounts: Vec<Account> = client.list_all_accounts().try_collect().await.unwrap();

    let names: Vec<&str> = accounts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["accounts/1", "accounts/2", "accounts/3"]);
}

#[tokio::test]
async fn test_list_all_properties_sends_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/properties"))
        .and(query_param("filter", "parent:accounts/100"))
        .and(query_param("showDeleted", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "properties": [
                {"name": "properties/1", "parent": "accounts/100"},
                {"name": "properties/2", "parent": "accounts/100"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = admin_client(mock_server.uri());
    let properties: Vec<Property> = client
        .list_all_properties("100")
        .try_collect()
        .await
        .unwrap();

    assert_eq!(properties.len(), 2);
    assert_eq!(properties[1].name, "properties/2");
}

#[tokio::test]
async fn test_list_accounts_permission_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/accounts"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Request had insufficient authentication scopes.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = admin_client(mock_server.uri());
    let err = client
        .list_all_accounts()
        .try_collect::<Vec<_>>()
        .await
        .unwrap_err();

    assert_eq!(err.service_code(), Some(ServiceCode::PermissionDenied));
}
